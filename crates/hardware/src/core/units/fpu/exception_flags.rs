//! IEEE exception flags raised by one FPU operation.
//!
//! The bit layout is that of `fflags` (NV is bit 4, NX is bit 0), so accruing
//! is a plain OR into the CSR.

use std::ops::{BitOr, BitOrAssign};

/// Set of raised exceptions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpFlags(u8);

impl FpFlags {
    /// Nothing raised.
    pub const NONE: Self = Self(0);
    /// Invalid operation.
    pub const NV: Self = Self(1 << 4);
    /// Division of a finite non-zero value by zero.
    pub const DZ: Self = Self(1 << 3);
    /// Overflow.
    pub const OF: Self = Self(1 << 2);
    /// Underflow.
    pub const UF: Self = Self(1 << 1);
    /// Inexact.
    pub const NX: Self = Self(1 << 0);

    /// Value to OR into `fflags`.
    pub const fn bits(self) -> u64 {
        self.0 as u64
    }

    /// `true` when nothing was raised.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` when every flag in `other` was raised.
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for FpFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FpFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
