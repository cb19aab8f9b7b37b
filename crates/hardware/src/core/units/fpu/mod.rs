//! Floating-Point Unit (FPU).
//!
//! Implements the F and D extensions on raw register bits: arithmetic, fused
//! multiply-add, sign injection, min/max, comparisons, classification, and the
//! conversions between integer and floating-point formats. Every operation
//! returns the raised exception flags along with its result.
//!
//! Single-precision arithmetic is evaluated in double precision and narrowed in
//! the requested rounding mode.
//!
//! Operations lean on three submodules:
//! - [`nan_handling`]: NaN boxing and canonical NaN propagation.
//! - [`rounding_modes`]: Rounding mode decoding and directed rounding.
//! - [`exception_flags`]: The accrued flag set.

/// Floating-point exception flag types.
pub mod exception_flags;

/// NaN boxing, unboxing, and canonical NaN propagation.
pub mod nan_handling;

/// Rounding mode definitions and support.
pub mod rounding_modes;

use self::exception_flags::FpFlags;
use self::nan_handling::{IeeeFloat, box_f32, canonicalize, fmax, fmin, unbox_f32};
use self::rounding_modes::RoundingMode;

/// Sign bit of a single.
const F32_SIGN_BIT: u32 = 0x8000_0000;

/// Sign bit of a double.
const F64_SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// Floating-point operation selected by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Square root of the first operand.
    Sqrt,
    /// Minimum number.
    Min,
    /// Maximum number.
    Max,
    /// `a * b + c`.
    MAdd,
    /// `a * b - c`.
    MSub,
    /// `-(a * b) - c`.
    NMAdd,
    /// `-(a * b) + c`.
    NMSub,
    /// Magnitude of `a`, sign of `b`.
    SgnJ,
    /// Magnitude of `a`, inverted sign of `b`.
    SgnJN,
    /// Magnitude of `a`, sign of `a` xor sign of `b`.
    SgnJX,
    /// Quiet equality; integer result.
    Eq,
    /// Signaling less-than; integer result.
    Lt,
    /// Signaling less-or-equal; integer result.
    Le,
}

/// Operand format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// Single precision, NaN-boxed in the register.
    Single,
    /// Double precision.
    Double,
}

/// Integer side of a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntKind {
    /// Signed 32-bit.
    W,
    /// Unsigned 32-bit.
    WU,
    /// Signed 64-bit.
    L,
    /// Unsigned 64-bit.
    LU,
}

impl IntKind {
    /// Half-open range `[lo, hi)` of representable values.
    fn bounds(self) -> (f64, f64) {
        match self {
            Self::W => (-2_147_483_648.0, 2_147_483_648.0),
            Self::WU => (0.0, 4_294_967_296.0),
            Self::L => (-9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0),
            Self::LU => (0.0, 18_446_744_073_709_551_616.0),
        }
    }

    /// Register value of the most positive result.
    const fn max(self) -> u64 {
        match self {
            Self::W => i32::MAX as u64,
            Self::WU | Self::LU => u64::MAX,
            Self::L => i64::MAX as u64,
        }
    }

    /// Register value of the most negative result.
    const fn min(self) -> u64 {
        match self {
            Self::W => i32::MIN as i64 as u64,
            Self::WU | Self::LU => 0,
            Self::L => i64::MIN as u64,
        }
    }

    /// Reads the integer operand from an x register.
    const fn widen(self, x: u64) -> i128 {
        match self {
            Self::W => x as i32 as i128,
            Self::WU => x as u32 as i128,
            Self::L => x as i64 as i128,
            Self::LU => x as i128,
        }
    }
}

/// Floating-Point Unit.
pub struct Fpu;

impl Fpu {
    /// Executes an arithmetic, sign-injection, min/max or comparison operation.
    ///
    /// # Arguments
    ///
    /// * `op`   - The operation.
    /// * `prec` - Operand format.
    /// * `a`, `b`, `c` - Raw f-register contents; `c` is only read by the FMA forms.
    /// * `rm`   - Resolved rounding mode.
    ///
    /// # Returns
    ///
    /// The register value (NaN-boxed for single precision, or `0`/`1` for
    /// comparisons) and the raised flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use spikelib_core::core::units::fpu::{Fpu, FpOp, Precision};
    /// use spikelib_core::core::units::fpu::rounding_modes::RoundingMode;
    ///
    /// let (sum, flags) = Fpu::execute(
    ///     FpOp::Add,
    ///     Precision::Double,
    ///     1.5_f64.to_bits(),
    ///     2.25_f64.to_bits(),
    ///     0,
    ///     RoundingMode::Rne,
    /// );
    /// assert_eq!(f64::from_bits(sum), 3.75);
    /// assert!(flags.is_empty());
    /// ```
    pub fn execute(
        op: FpOp,
        prec: Precision,
        a: u64,
        b: u64,
        c: u64,
        rm: RoundingMode,
    ) -> (u64, FpFlags) {
        match prec {
            Precision::Single => Self::execute_f32(op, a, b, c, rm),
            Precision::Double => Self::execute_f64(op, a, b, c),
        }
    }

    fn execute_f32(op: FpOp, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let (fa, fb, fc) = (unbox_f32(a), unbox_f32(b), unbox_f32(c));
        let (da, db, dc) = (f64::from(fa), f64::from(fb), f64::from(fc));

        let exact = match op {
            FpOp::Add => da + db,
            FpOp::Sub => da - db,
            FpOp::Mul => da * db,
            FpOp::Div => da / db,
            FpOp::Sqrt => da.sqrt(),
            FpOp::MAdd => da.mul_add(db, dc),
            FpOp::MSub => da.mul_add(db, -dc),
            FpOp::NMAdd => (-da).mul_add(db, -dc),
            FpOp::NMSub => (-da).mul_add(db, dc),
            FpOp::SgnJ | FpOp::SgnJN | FpOp::SgnJX => {
                let sign = match op {
                    FpOp::SgnJ => fb.to_bits() & F32_SIGN_BIT,
                    FpOp::SgnJN => !fb.to_bits() & F32_SIGN_BIT,
                    _ => (fa.to_bits() ^ fb.to_bits()) & F32_SIGN_BIT,
                };
                let bits = (fa.to_bits() & !F32_SIGN_BIT) | sign;
                return (box_f32(bits), FpFlags::NONE);
            }
            FpOp::Min | FpOp::Max => {
                let flags = invalid_if(fa.signaling() || fb.signaling());
                let r = if op == FpOp::Min { fmin(fa, fb) } else { fmax(fa, fb) };
                return (box_f32(r.to_bits()), flags);
            }
            FpOp::Eq | FpOp::Lt | FpOp::Le => return compare(op, fa, fb),
        };

        let inputs = operands(op, &[fa, fb, fc]);
        let mut flags = arithmetic_flags(op, &inputs, da, db, exact);
        let narrowed = rm.narrow(exact);
        if !exact.is_nan() && f64::from(narrowed) != exact {
            flags |= FpFlags::NX;
            if exact.abs() > f64::from(f32::MAX) {
                flags |= FpFlags::OF;
            } else if narrowed.abs() < f32::MIN_POSITIVE {
                flags |= FpFlags::UF;
            }
        }
        (box_f32(canonicalize(narrowed).to_bits()), flags)
    }

    fn execute_f64(op: FpOp, a: u64, b: u64, c: u64) -> (u64, FpFlags) {
        let (fa, fb, fc) = (f64::from_bits(a), f64::from_bits(b), f64::from_bits(c));

        let result = match op {
            FpOp::Add => fa + fb,
            FpOp::Sub => fa - fb,
            FpOp::Mul => fa * fb,
            FpOp::Div => fa / fb,
            FpOp::Sqrt => fa.sqrt(),
            FpOp::MAdd => fa.mul_add(fb, fc),
            FpOp::MSub => fa.mul_add(fb, -fc),
            FpOp::NMAdd => (-fa).mul_add(fb, -fc),
            FpOp::NMSub => (-fa).mul_add(fb, fc),
            FpOp::SgnJ => return ((a & !F64_SIGN_BIT) | (b & F64_SIGN_BIT), FpFlags::NONE),
            FpOp::SgnJN => return ((a & !F64_SIGN_BIT) | (!b & F64_SIGN_BIT), FpFlags::NONE),
            FpOp::SgnJX => return (a ^ (b & F64_SIGN_BIT), FpFlags::NONE),
            FpOp::Min | FpOp::Max => {
                let flags = invalid_if(fa.signaling() || fb.signaling());
                let r = if op == FpOp::Min { fmin(fa, fb) } else { fmax(fa, fb) };
                return (r.to_bits(), flags);
            }
            FpOp::Eq | FpOp::Lt | FpOp::Le => return compare(op, fa, fb),
        };

        let inputs = operands(op, &[fa, fb, fc]);
        let mut flags = arithmetic_flags(op, &inputs, fa, fb, result);
        let finite_inputs = inputs.iter().all(|x| x.is_finite());
        if result.is_infinite() && finite_inputs && !flags.contains(FpFlags::DZ) {
            flags |= FpFlags::OF | FpFlags::NX;
        }
        (canonicalize(result).to_bits(), flags)
    }

    /// Classifies a value into the ten-bit `fclass` mask.
    pub fn classify(prec: Precision, a: u64) -> u64 {
        // Single values are classified exactly in double precision.
        let (f, signaling) = match prec {
            Precision::Single => {
                let f = unbox_f32(a);
                (f64::from(f), f.signaling())
            }
            Precision::Double => {
                let f = f64::from_bits(a);
                (f, f.signaling())
            }
        };
        let negative = f.is_sign_negative();
        let subnormal = match prec {
            Precision::Single => f != 0.0 && f.abs() < f64::from(f32::MIN_POSITIVE),
            Precision::Double => f.is_subnormal(),
        };
        let bit = if f.is_nan() {
            if signaling { 8 } else { 9 }
        } else if f.is_infinite() {
            if negative { 0 } else { 7 }
        } else if f == 0.0 {
            if negative { 3 } else { 4 }
        } else if subnormal {
            if negative { 2 } else { 5 }
        } else if negative {
            1
        } else {
            6
        };
        1 << bit
    }

    /// Converts a float to an integer with saturation.
    ///
    /// NaN converts to the most positive value. Out-of-range inputs saturate and
    /// raise NV; in-range inputs that were rounded raise NX. 32-bit results are
    /// sign-extended into the register.
    pub fn to_int(prec: Precision, a: u64, kind: IntKind, rm: RoundingMode) -> (u64, FpFlags) {
        let x = match prec {
            Precision::Single => f64::from(unbox_f32(a)),
            Precision::Double => f64::from_bits(a),
        };
        if x.is_nan() {
            return (kind.max(), FpFlags::NV);
        }

        let r = rm.round_integral(x);
        let (lo, hi) = kind.bounds();
        if r < lo {
            return (kind.min(), FpFlags::NV);
        }
        if r >= hi {
            return (kind.max(), FpFlags::NV);
        }

        let value = match kind {
            IntKind::W => r as i32 as i64 as u64,
            IntKind::WU => r as u32 as i32 as i64 as u64,
            IntKind::L => r as i64 as u64,
            IntKind::LU => r as u64,
        };
        let flags = if r == x { FpFlags::NONE } else { FpFlags::NX };
        (value, flags)
    }

    /// Converts an integer register value to a float.
    pub fn from_int(prec: Precision, x: u64, kind: IntKind, rm: RoundingMode) -> (u64, FpFlags) {
        let wide = kind.widen(x);
        let approx = wide as f64;
        match prec {
            Precision::Single => {
                let r = rm.narrow(approx);
                let flags = if r as i128 == wide { FpFlags::NONE } else { FpFlags::NX };
                (box_f32(r.to_bits()), flags)
            }
            Precision::Double => {
                let flags = if approx as i128 == wide { FpFlags::NONE } else { FpFlags::NX };
                (approx.to_bits(), flags)
            }
        }
    }

    /// Converts between single and double precision.
    ///
    /// `to` names the destination format; the source is the other one.
    pub fn convert(to: Precision, a: u64, rm: RoundingMode) -> (u64, FpFlags) {
        match to {
            Precision::Double => {
                let f = unbox_f32(a);
                let flags = invalid_if(f.signaling());
                (canonicalize(f64::from(f)).to_bits(), flags)
            }
            Precision::Single => {
                let d = f64::from_bits(a);
                let mut flags = invalid_if(d.signaling());
                let r = rm.narrow(d);
                if !d.is_nan() && f64::from(r) != d {
                    flags |= FpFlags::NX;
                    if d.abs() > f64::from(f32::MAX) {
                        flags |= FpFlags::OF;
                    } else if r.abs() < f32::MIN_POSITIVE {
                        flags |= FpFlags::UF;
                    }
                }
                (box_f32(canonicalize(r).to_bits()), flags)
            }
        }
    }
}

/// Returns NV when `cond` holds.
fn invalid_if(cond: bool) -> FpFlags {
    if cond { FpFlags::NV } else { FpFlags::NONE }
}

/// Operands an arithmetic operation actually reads.
fn operands<F: IeeeFloat>(op: FpOp, all: &[F; 3]) -> Vec<F> {
    match op {
        FpOp::Sqrt => all[..1].to_vec(),
        FpOp::MAdd | FpOp::MSub | FpOp::NMAdd | FpOp::NMSub => all.to_vec(),
        _ => all[..2].to_vec(),
    }
}

/// Flags common to both precisions: signaling inputs, invalid results and division by zero.
fn arithmetic_flags<F: IeeeFloat>(op: FpOp, inputs: &[F], a: f64, b: f64, result: f64) -> FpFlags {
    let any_nan = inputs.iter().any(|x| x.nan());
    let mut flags = invalid_if(inputs.iter().any(|x| x.signaling()));
    if result.is_nan() && !any_nan {
        flags |= FpFlags::NV;
    }
    if op == FpOp::Div && b == 0.0 && a.is_finite() && a != 0.0 {
        flags |= FpFlags::DZ;
    }
    flags
}

/// Comparison with integer result. FEQ is quiet; FLT and FLE signal on any NaN.
fn compare<F: IeeeFloat>(op: FpOp, a: F, b: F) -> (u64, FpFlags) {
    let flags = match op {
        FpOp::Eq => invalid_if(a.signaling() || b.signaling()),
        _ => invalid_if(a.nan() || b.nan()),
    };
    let result = match op {
        FpOp::Eq => a == b,
        FpOp::Lt => a < b,
        _ => a <= b,
    };
    (u64::from(result), flags)
}
