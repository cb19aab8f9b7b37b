//! Engine entry point.
//!
//! Wraps a hart and its memory map into the [`Simulator`] that embedders drive.

/// The engine instance and its host-facing accessors.
pub mod simulator;

pub use simulator::Simulator;
