//! Step definitions for task creation scenarios.

mod given;
mod when;
pub mod world;
