//! Adapter implementations for the user ports.

pub mod memory;
pub mod postgres;
