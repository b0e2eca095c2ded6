//! Assistant gateway over an external completion service.
//!
//! Every call pairs a rendered prompt with a strict JSON schema and validates
//! the reply into typed records before anything reaches the task or context
//! modules. Failures are reported as [`domain::AiServiceError`]; nothing is
//! retried.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Gateway and insight services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
