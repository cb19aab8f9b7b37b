//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encodings, function codes, and decoding logic the hart needs to
//! interpret RV64IMAFDC with Zicsr and Zifencei.
//!
//! # Modules
//!
//! * `opcodes`: Major opcodes and fixed system encodings.
//! * `funct`: `funct3`/`funct5`/`funct7` selectors grouped by extension.
//! * `cause`: Trap cause codes written to `mcause`.
//! * `rvc`: Expansion of 16-bit compressed parcels.

/// Trap cause codes.
pub mod cause;

/// Instruction decoding into a flat field structure.
pub mod decode;

/// Function code selectors for every supported extension.
pub mod funct;

/// Bit-field extraction from raw 32-bit encodings.
pub mod instruction;

/// Major opcodes and fixed system instruction encodings.
pub mod opcodes;

/// Compressed instruction extension (16-bit instruction encoding).
pub mod rvc;
