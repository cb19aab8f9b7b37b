//! ALU logical and comparison operations.
//!
//! None of these have `W` forms, so they always operate on the full 64 bits.

use super::AluOp;

/// Executes a bitwise or set-less-than operation.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        AluOp::Sltu => u64::from(a < b),
        _ => 0,
    }
}
