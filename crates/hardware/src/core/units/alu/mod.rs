//! Arithmetic Logic Unit (ALU).
//!
//! Integer arithmetic for the base ISA and the M extension, in 64-bit and
//! 32-bit (`W` suffix) forms. Operations are grouped by category:
//! - [`arithmetic`]: Add, Sub and the multiply/divide family
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::isa::funct::{alu, funct7, muldiv};

/// Integer ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Multiply, low bits.
    Mul,
    /// Multiply, high bits, signed x signed.
    Mulh,
    /// Multiply, high bits, signed x unsigned.
    Mulhsu,
    /// Multiply, high bits, unsigned x unsigned.
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

impl AluOp {
    /// Selects the operation of a register-register instruction.
    ///
    /// Returns `None` for `funct3`/`funct7` pairs with no defined operation.
    pub const fn from_reg(funct3: u32, f7: u32) -> Option<Self> {
        let op = match (f7, funct3) {
            (funct7::DEFAULT, alu::ADD_SUB) => Self::Add,
            (funct7::SUB_SRA, alu::ADD_SUB) => Self::Sub,
            (funct7::DEFAULT, alu::SLL) => Self::Sll,
            (funct7::DEFAULT, alu::SLT) => Self::Slt,
            (funct7::DEFAULT, alu::SLTU) => Self::Sltu,
            (funct7::DEFAULT, alu::XOR) => Self::Xor,
            (funct7::DEFAULT, alu::SRL_SRA) => Self::Srl,
            (funct7::SUB_SRA, alu::SRL_SRA) => Self::Sra,
            (funct7::DEFAULT, alu::OR) => Self::Or,
            (funct7::DEFAULT, alu::AND) => Self::And,
            (funct7::MULDIV, muldiv::MUL) => Self::Mul,
            (funct7::MULDIV, muldiv::MULH) => Self::Mulh,
            (funct7::MULDIV, muldiv::MULHSU) => Self::Mulhsu,
            (funct7::MULDIV, muldiv::MULHU) => Self::Mulhu,
            (funct7::MULDIV, muldiv::DIV) => Self::Div,
            (funct7::MULDIV, muldiv::DIVU) => Self::Divu,
            (funct7::MULDIV, muldiv::REM) => Self::Rem,
            (funct7::MULDIV, muldiv::REMU) => Self::Remu,
            _ => return None,
        };
        Some(op)
    }

    /// Returns `true` for the M extension operations.
    pub const fn is_muldiv(self) -> bool {
        matches!(
            self,
            Self::Mul
                | Self::Mulh
                | Self::Mulhsu
                | Self::Mulhu
                | Self::Div
                | Self::Divu
                | Self::Rem
                | Self::Remu
        )
    }
}

/// Arithmetic Logic Unit for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op`   - The ALU operation to perform.
    /// * `a`    - First operand.
    /// * `b`    - Second operand, also the shift amount.
    /// * `is32` - Perform the `W` form; the result is sign-extended from bit 31.
    ///
    /// # Examples
    ///
    /// ```
    /// use spikelib_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0x1111_0000, 0x1111, false), 0x1111_1111);
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1, true), 0);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 0, false), u64::MAX);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => arithmetic::execute(op, a, b, is32),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b, is32),
        }
    }
}
