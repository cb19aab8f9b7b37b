//! RISC-V Compressed Extension (C).
//!
//! Every 16-bit parcel is rewritten into the 32-bit instruction it abbreviates, so
//! the rest of the hart only ever decodes full-width encodings.
//!
//! # Structure
//!
//! - `constants`: Quadrant and `funct3` selectors for compressed parcels.
//! - `expand`: The expansion itself.

/// Compressed instruction quadrant and opcode constants.
pub mod constants;

/// Logic to expand 16-bit compressed instructions into 32-bit equivalents.
pub mod expand;

pub use expand::expand;
