//! Unit tests for the assistant module.
