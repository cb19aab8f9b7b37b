//! Execution units.
//!
//! The hart's functional units: the integer ALU, the floating-point unit, and
//! the instruction cache in front of fetch.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Direct-mapped instruction cache.
pub mod cache;

/// Floating-Point Unit for IEEE 754 operations.
pub mod fpu;
