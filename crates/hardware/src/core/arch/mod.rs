//! RISC-V architectural state.
//!
//! This module contains the architectural elements of the hart:
//! 1. **CSRs:** Control and Status Register definitions and access logic.
//! 2. **FPRs:** Floating-Point Register file implementation.
//! 3. **GPRs:** General-Purpose Register file implementation.
//! 4. **ISA:** Parsing of ISA descriptor strings into the enabled extension set.

/// Control and Status Register (CSR) definitions and access logic.
pub mod csr;

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// ISA descriptor parsing and `misa` construction.
pub mod isa;
