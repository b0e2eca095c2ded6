//! Adapter implementations of the context ports.

pub mod memory;
pub mod postgres;
