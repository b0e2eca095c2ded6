//! Dated context notes used to ground assistant prompts.
//!
//! Entries are immutable once captured and are read back through a trailing
//! window of days, newest first.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
