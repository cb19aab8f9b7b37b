//! Shared helpers for the binding tests.


/// Handle harness.
pub mod harness;
