//! ALU shift operations.
//!
//! Shift amounts are masked to 6 bits for 64-bit shifts and 5 bits for the
//! `W` forms, whose results are sign-extended from bit 31.

use super::AluOp;

/// Shift amount mask of 64-bit shifts.
const SHAMT_MASK_64: u32 = 0x3F;

/// Shift amount mask of 32-bit shifts.
const SHAMT_MASK_32: u32 = 0x1F;

/// Executes a shift operation.
pub fn execute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
    if is32 {
        let sh = b as u32 & SHAMT_MASK_32;
        let word = match op {
            AluOp::Sll => (a as u32) << sh,
            AluOp::Srl => (a as u32) >> sh,
            AluOp::Sra => ((a as i32) >> sh) as u32,
            _ => 0,
        };
        return word as i32 as i64 as u64;
    }

    let sh = b as u32 & SHAMT_MASK_64;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i64) >> sh) as u64,
        _ => 0,
    }
}
