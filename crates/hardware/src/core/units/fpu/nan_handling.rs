//! NaN boxing and NaN propagation.
//!
//! Single-precision values live in the low half of a 64-bit register with the
//! upper 32 bits all ones. A register that is not properly boxed reads as the
//! canonical NaN. Every arithmetic NaN result is replaced by the canonical quiet
//! NaN; sign injection and moves keep payloads intact.

/// Canonical quiet NaN for single precision.
pub const CANONICAL_NAN_F32: u32 = 0x7FC0_0000;

/// Canonical quiet NaN for double precision.
pub const CANONICAL_NAN_F64: u64 = 0x7FF8_0000_0000_0000;

/// Upper half of a NaN-boxed single.
const NAN_BOX_MASK: u64 = 0xFFFF_FFFF_0000_0000;

/// NaN-boxes raw single-precision bits.
#[inline]
pub const fn box_f32(bits: u32) -> u64 {
    bits as u64 | NAN_BOX_MASK
}

/// Reads a single from a register, substituting the canonical NaN if it is not boxed.
#[inline]
pub const fn unbox_f32(reg: u64) -> f32 {
    if reg & NAN_BOX_MASK == NAN_BOX_MASK {
        f32::from_bits(reg as u32)
    } else {
        f32::from_bits(CANONICAL_NAN_F32)
    }
}

/// IEEE 754 behaviour shared by both precisions.
pub trait IeeeFloat: Copy + PartialOrd {
    /// The canonical quiet NaN.
    fn canonical_nan() -> Self;
    /// Returns `true` for any NaN.
    fn nan(self) -> bool;
    /// Returns `true` for a signaling NaN (quiet bit clear).
    fn signaling(self) -> bool;
    /// Returns `true` when the sign bit is set.
    fn negative(self) -> bool;
}

impl IeeeFloat for f32 {
    fn canonical_nan() -> Self {
        Self::from_bits(CANONICAL_NAN_F32)
    }

    fn nan(self) -> bool {
        self.is_nan()
    }

    fn signaling(self) -> bool {
        self.is_nan() && self.to_bits() & 0x0040_0000 == 0
    }

    fn negative(self) -> bool {
        self.is_sign_negative()
    }
}

impl IeeeFloat for f64 {
    fn canonical_nan() -> Self {
        Self::from_bits(CANONICAL_NAN_F64)
    }

    fn nan(self) -> bool {
        self.is_nan()
    }

    fn signaling(self) -> bool {
        self.is_nan() && self.to_bits() & 0x0008_0000_0000_0000 == 0
    }

    fn negative(self) -> bool {
        self.is_sign_negative()
    }
}

/// Replaces any NaN with the canonical NaN.
#[inline]
pub fn canonicalize<F: IeeeFloat>(x: F) -> F {
    if x.nan() { F::canonical_nan() } else { x }
}

/// `minimumNumber`: a lone NaN operand is ignored and `-0.0 < +0.0`.
pub fn fmin<F: IeeeFloat>(a: F, b: F) -> F {
    match (a.nan(), b.nan()) {
        (true, true) => F::canonical_nan(),
        (true, false) => b,
        (false, true) => a,
        (false, false) if a == b => {
            if a.negative() {
                a
            } else {
                b
            }
        }
        (false, false) => {
            if a < b {
                a
            } else {
                b
            }
        }
    }
}

/// `maximumNumber`: a lone NaN operand is ignored and `+0.0 > -0.0`.
pub fn fmax<F: IeeeFloat>(a: F, b: F) -> F {
    match (a.nan(), b.nan()) {
        (true, true) => F::canonical_nan(),
        (true, false) => b,
        (false, true) => a,
        (false, false) if a == b => {
            if a.negative() {
                b
            } else {
                a
            }
        }
        (false, false) => {
            if a > b {
                a
            } else {
                b
            }
        }
    }
}
