//! RISC-V Floating-Point Register File.
//!
//! Stores 32 registers as raw 64-bit containers (FLEN = 64). Keeping raw bits
//! instead of `f64` values preserves NaN payloads and the NaN-boxing of
//! single-precision values exactly as written.

/// Floating-Point Register file.
#[derive(Clone, Debug, Default)]
pub struct Fpr {
    fregs: [u64; 32],
}

impl Fpr {
    /// Creates a new floating-point register file with all registers initialized to `+0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a floating-point register value as raw bits.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        self.fregs[idx & 0x1F]
    }

    /// Writes a floating-point register value from raw bits.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        self.fregs[idx & 0x1F] = val;
    }
}
