//! Core processor implementation.
//!
//! This module contains the hart: its architectural state, the functional units it
//! executes with, and the step loop that ties them together.

/// Architecture-specific components (CSRs, register files, ISA descriptor).
pub mod arch;

/// CPU core implementation: fetch, execute, memory access, traps.
pub mod cpu;

/// Execution units (ALU, FPU, instruction cache).
pub mod units;

pub use self::cpu::Cpu;
