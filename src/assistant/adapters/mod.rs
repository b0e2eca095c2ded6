//! Adapter implementations of the completion port.

pub mod openai;
pub mod scripted;
