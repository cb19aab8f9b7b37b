//! Instruction field extraction.
//!
//! Every RISC-V format places its register and function fields at fixed bit
//! positions, so the fields are read straight off the raw encoding through the
//! [`InstructionBits`] trait.

use crate::common::constants::{OPCODE_MASK, REG_FIELD_MASK};

/// Bit mask for the funct3 field (bits 12-14).
const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for the funct7 field (bits 25-31).
const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for the CSR address field (bits 20-31).
const CSR_MASK: u32 = 0xFFF;
/// Bit mask for the two-bit FP format field (bits 25-26).
const FMT_MASK: u32 = 0x3;

/// Field accessors over a 32-bit instruction encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the third source register field (bits 27-31), used by fused multiply-add.
    fn rs3(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    ///
    /// Doubles as the rounding-mode field of floating-point instructions.
    fn funct3(&self) -> u32;

    /// Extracts the funct5 field (bits 27-31) that selects an AMO operation.
    fn funct5(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the FP format field (bits 25-26): 0 for single, 1 for double.
    fn fmt(&self) -> u32;

    /// Extracts the 12-bit CSR address (bits 20-31).
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_FIELD_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_FIELD_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_FIELD_MASK) as usize
    }

    #[inline(always)]
    fn rs3(&self) -> usize {
        ((self >> 27) & REG_FIELD_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct5(&self) -> u32 {
        (self >> 27) & REG_FIELD_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn fmt(&self) -> u32 {
        (self >> 25) & FMT_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> 20) & CSR_MASK
    }
}
