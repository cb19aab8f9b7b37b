//! ISA descriptor parsing.
//!
//! Turns a descriptor such as `"RV64IMAFDC"` or `"rv64gc_zicsr_zifencei"` into the set
//! of extensions the hart decodes. Only RV64 is modelled; the `G` shorthand expands to
//! `IMAFD` and `Z*` multi-letter tokens are accepted and ignored, because Zicsr and
//! Zifencei are always present.

use crate::common::EngineError;
use crate::core::arch::csr::{
    MISA_EXT_A, MISA_EXT_C, MISA_EXT_D, MISA_EXT_F, MISA_EXT_I, MISA_EXT_M, MISA_XLEN_64,
};

/// Enabled extension set of a hart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Isa {
    name: String,
    /// Integer multiply/divide.
    pub m: bool,
    /// Atomics.
    pub a: bool,
    /// Single-precision floating point.
    pub f: bool,
    /// Double-precision floating point.
    pub d: bool,
    /// Compressed instructions.
    pub c: bool,
}

impl Isa {
    /// Parses an ISA descriptor.
    ///
    /// # Arguments
    ///
    /// * `descriptor` - Case-insensitive string starting with `rv64`.
    ///
    /// # Returns
    ///
    /// The extension set, or [`EngineError::UnsupportedIsa`] for any other base,
    /// unknown letters, a missing `I`, or `D` without `F`.
    pub fn parse(descriptor: &str) -> Result<Self, EngineError> {
        let unsupported = || EngineError::UnsupportedIsa(descriptor.to_string());
        let lower = descriptor.trim().to_ascii_lowercase();
        let rest = lower.strip_prefix("rv64").ok_or_else(unsupported)?;

        let mut tokens = rest.split('_');
        let letters = tokens.next().unwrap_or_default();
        if tokens.any(|t| !t.starts_with('z') || t.len() < 2) {
            return Err(unsupported());
        }

        let mut isa = Self {
            name: descriptor.trim().to_string(),
            m: false,
            a: false,
            f: false,
            d: false,
            c: false,
        };
        let mut base = false;
        for letter in letters.chars() {
            match letter {
                'i' => base = true,
                'g' => {
                    base = true;
                    isa.m = true;
                    isa.a = true;
                    isa.f = true;
                    isa.d = true;
                }
                'm' => isa.m = true,
                'a' => isa.a = true,
                'f' => isa.f = true,
                'd' => isa.d = true,
                'c' => isa.c = true,
                _ => return Err(unsupported()),
            }
        }

        if !base || (isa.d && !isa.f) {
            return Err(unsupported());
        }
        Ok(isa)
    }

    /// Returns the descriptor this set was parsed from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `misa` CSR value for this extension set.
    pub const fn misa(&self) -> u64 {
        let mut misa = MISA_XLEN_64 | MISA_EXT_I;
        if self.m {
            misa |= MISA_EXT_M;
        }
        if self.a {
            misa |= MISA_EXT_A;
        }
        if self.f {
            misa |= MISA_EXT_F;
        }
        if self.d {
            misa |= MISA_EXT_D;
        }
        if self.c {
            misa |= MISA_EXT_C;
        }
        misa
    }

    /// Returns the required instruction-address alignment mask (1 with C, 3 without).
    pub const fn fetch_align_mask(&self) -> u64 {
        if self.c { 1 } else { 3 }
    }
}
