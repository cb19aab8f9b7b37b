//! Architectural register state of the hart.
//!
//! Integer and floating-point files live side by side. F-registers hold raw
//! 64-bit containers; the FPU NaN-boxes singles before writing them here.

use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;

/// `x0..x31` plus `f0..f31`.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    gpr: Gpr,
    fpr: Fpr,
}

impl RegisterFile {
    /// All registers zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Integer register `idx`; `x0` reads as zero.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Sets integer register `idx`; writes to `x0` are dropped.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        self.gpr.write(idx, val);
    }

    /// Container bits of f-register `idx`.
    #[inline]
    pub fn read_f(&self, idx: usize) -> u64 {
        self.fpr.read(idx)
    }

    /// Replaces the container bits of f-register `idx`.
    #[inline]
    pub fn write_f(&mut self, idx: usize, val: u64) {
        self.fpr.write(idx, val);
    }
}
