//! Floating-point rounding modes.
//!
//! | Value | Mode | Description                             |
//! |-------|------|-----------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even          |
//! | 0b001 | RTZ  | Round towards Zero                      |
//! | 0b010 | RDN  | Round Down (towards -inf)               |
//! | 0b011 | RUP  | Round Up (towards +inf)                 |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! Integer conversions and single-precision arithmetic honour every mode.
//! Double-precision arithmetic uses the host's round-to-nearest-even.

use crate::isa::funct::fp::RM_DYN;

/// RISC-V rounding mode encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even.
    Rne = 0b000,
    /// Round towards Zero.
    Rtz = 0b001,
    /// Round Down.
    Rdn = 0b010,
    /// Round Up.
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    Rmm = 0b100,
}

impl RoundingMode {
    /// Decodes a static 3-bit rounding mode; `None` for reserved values and `DYN`.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & 0x7 {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Resolves an instruction's `rm` field, consulting `frm` for `DYN`.
    ///
    /// `None` means the effective mode is reserved and the instruction is illegal.
    pub const fn resolve(field: u32, frm: u64) -> Option<Self> {
        if field == RM_DYN {
            Self::from_bits(frm as u32)
        } else {
            Self::from_bits(field)
        }
    }

    /// Rounds `x` to an integral value in this mode.
    pub fn round_integral(self, x: f64) -> f64 {
        match self {
            Self::Rne => x.round_ties_even(),
            Self::Rtz => x.trunc(),
            Self::Rdn => x.floor(),
            Self::Rup => x.ceil(),
            Self::Rmm => x.round(),
        }
    }

    /// Narrows an exact (or double-precision) value to single precision in this mode.
    pub fn narrow(self, exact: f64) -> f32 {
        let nearest = exact as f32;
        if exact.is_nan() || f64::from(nearest) == exact {
            return nearest;
        }
        let above = f64::from(nearest) > exact;
        match self {
            Self::Rne => nearest,
            Self::Rtz if f64::from(nearest.abs()) > exact.abs() => toward_zero(nearest),
            Self::Rtz => nearest,
            Self::Rdn if above => step_down(nearest),
            Self::Rup if !above => step_up(nearest),
            Self::Rdn | Self::Rup => nearest,
            Self::Rmm => {
                let other = if above {
                    step_down(nearest)
                } else {
                    step_up(nearest)
                };
                let tie = (f64::from(nearest) - exact).abs() == (f64::from(other) - exact).abs();
                if tie && other.abs() > nearest.abs() {
                    other
                } else {
                    nearest
                }
            }
        }
    }
}

/// Next representable single towards +inf.
fn step_up(x: f32) -> f32 {
    if x == f32::INFINITY {
        x
    } else if x == 0.0 {
        f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        f32::from_bits(x.to_bits() - 1)
    }
}

/// Next representable single towards -inf.
fn step_down(x: f32) -> f32 {
    if x == f32::NEG_INFINITY {
        x
    } else if x == 0.0 {
        f32::from_bits(0x8000_0001)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

fn toward_zero(x: f32) -> f32 {
    if x > 0.0 { step_down(x) } else { step_up(x) }
}
