//! Register access façade.
//!
//! Registers are addressed by a closed id space shared with C callers:
//! `x0..x31` are 0-31, the PC is 32, and `f0..f31` are 33-64. A [`RegId`] can
//! only be built inside that range, so the accessors below cannot fail.

use std::fmt;

use crate::error::SpError;
use crate::system::SimHandle;

/// Upper half of a NaN-boxed single in a 64-bit f-register.
const NAN_BOX: u64 = 0xFFFF_FFFF_0000_0000;

/// Registers per file.
const FILE_LEN: u8 = 32;

/// Wire code of `f0`.
const F_BASE: u8 = FILE_LEN + 1;

/// Where an id points.
enum Slot {
    X(usize),
    Pc,
    F(usize),
}

/// Architectural register id, holding its wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegId(u8);

impl RegId {
    /// The program counter.
    pub const PC: Self = Self(FILE_LEN);
    /// Wire code of the PC.
    pub const PC_CODE: i32 = FILE_LEN as i32;
    /// Number of ids in the enumeration.
    pub const COUNT: i32 = (F_BASE + FILE_LEN) as i32;

    /// Integer register `x{n}`.
    ///
    /// # Errors
    ///
    /// [`SpError::RegisterIdInvalid`] for `n > 31`.
    pub const fn x(n: u8) -> Result<Self, SpError> {
        if n < FILE_LEN {
            Ok(Self(n))
        } else {
            Err(SpError::RegisterIdInvalid)
        }
    }

    /// Floating-point register `f{n}`.
    ///
    /// # Errors
    ///
    /// [`SpError::RegisterIdInvalid`] for `n > 31`.
    pub const fn f(n: u8) -> Result<Self, SpError> {
        if n < FILE_LEN {
            Ok(Self(F_BASE + n))
        } else {
            Err(SpError::RegisterIdInvalid)
        }
    }

    /// Integer value on the wire.
    pub const fn code(self) -> i32 {
        self.0 as i32
    }

    /// `true` for `f0..f31`.
    pub const fn is_float(self) -> bool {
        self.0 >= F_BASE
    }

    /// Every id in wire order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(|code| Self::try_from(code).ok())
    }

    const fn slot(self) -> Slot {
        match self.0 {
            n if n < FILE_LEN => Slot::X(n as usize),
            FILE_LEN => Slot::Pc,
            n => Slot::F((n - F_BASE) as usize),
        }
    }
}

impl TryFrom<i32> for RegId {
    type Error = SpError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .ok()
            .filter(|&c| i32::from(c) < Self::COUNT)
            .map(Self)
            .ok_or(SpError::RegisterIdInvalid)
    }
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot() {
            Slot::X(n) => write!(f, "x{n}"),
            Slot::Pc => f.write_str("pc"),
            Slot::F(n) => write!(f, "f{n}"),
        }
    }
}

/// A typed register value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegValue {
    /// Integer register or PC contents.
    U64(u64),
    /// Single-precision value; NaN-boxed when written to an f-register.
    F32(f32),
    /// Double-precision value, or the raw 64-bit f-register container.
    F64(f64),
}

impl RegValue {
    /// Raw 64-bit pattern of the value as `target` stores it.
    pub fn bits_for(self, target: RegId) -> u64 {
        match self {
            Self::F32(v) if target.is_float() => u64::from(v.to_bits()) | NAN_BOX,
            _ => self.to_bits(),
        }
    }

    /// Raw 64-bit pattern of the value.
    pub fn to_bits(self) -> u64 {
        match self {
            Self::U64(v) => v,
            Self::F32(v) => u64::from(v.to_bits()),
            Self::F64(v) => v.to_bits(),
        }
    }
}

impl SimHandle {
    /// Reads a register as its raw 64-bit container.
    pub fn read_register_bits(&self, id: RegId) -> u64 {
        let sim = self.simulator();
        match id.slot() {
            Slot::X(n) => sim.read_x(n),
            Slot::Pc => sim.pc(),
            Slot::F(n) => sim.read_f(n),
        }
    }

    /// Writes a register's raw 64-bit container. Writes to `x0` are discarded.
    pub fn write_register_bits(&mut self, id: RegId, bits: u64) {
        let sim = self.simulator_mut();
        match id.slot() {
            Slot::X(n) => sim.write_x(n, bits),
            Slot::Pc => sim.set_pc(bits),
            Slot::F(n) => sim.write_f(n, bits),
        }
    }

    /// Reads a register: `U64` for x-registers and the PC, `F64` with the raw
    /// container bits for f-registers.
    pub fn read_register(&self, id: RegId) -> RegValue {
        let bits = self.read_register_bits(id);
        if id.is_float() {
            RegValue::F64(f64::from_bits(bits))
        } else {
            RegValue::U64(bits)
        }
    }

    /// Writes a typed value into a register.
    pub fn write_register(&mut self, id: RegId, value: RegValue) {
        self.write_register_bits(id, value.bits_for(id));
    }
}
