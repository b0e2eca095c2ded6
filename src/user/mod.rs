//! Task owners.
//!
//! Users are provisioned once and never mutated here. The email address is
//! the natural key used by the presentation layer to resolve an owner.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
