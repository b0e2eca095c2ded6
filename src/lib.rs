//! Smart todo: a task manager whose assistant reads recent context notes.
//!
//! Users capture dated context entries (messages, emails, notes, meeting
//! minutes). When creating a task the assistant can suggest its priority
//! and deadline from that context, or parse the whole task out of free
//! text. The same context grounds task recommendations and workload
//! analyses.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, etc.)
//! - **Services**: Use cases composed from ports
//!
//! # Modules
//!
//! - [`user`]: Task owners
//! - [`task`]: Task lifecycle, including assisted creation
//! - [`context`]: Dated context notes
//! - [`assistant`]: Completion port, gateway, and insights
//! - [`api`]: HTTP+JSON surface
//! - [`config`], [`database`], [`seed`], [`telemetry`]: Process wiring

pub mod api;
pub mod assistant;
pub mod config;
pub mod context;
pub mod database;
pub mod seed;
pub mod task;
pub mod telemetry;
pub mod user;

#[cfg(test)]
mod test_support;
