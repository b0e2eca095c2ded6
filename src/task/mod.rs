//! Task management.
//!
//! Tasks are created through a workflow that may consult the assistant for
//! a priority suggestion or a full natural-language parse, then mutated by
//! partial updates and completion toggles. Listing order is a contract: open
//! before completed, then priority, then deadline, then newest first.
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
