//! RISC-V Instruction Decoder.
//!
//! Turns a 32-bit encoding (compressed parcels are expanded first) into a flat
//! [`Decoded`] record. The immediate is chosen by the format the major opcode
//! implies and is sign-extended to 64 bits.

use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes;

/// Decoded instruction with every field extracted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Major opcode.
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Third source register index (FMA only).
    pub rs3: usize,
    /// Function code field 3.
    pub funct3: u32,
    /// Function code field 7.
    pub funct7: u32,
    /// Sign-extended immediate; zero for R-type formats.
    pub imm: i64,
}

/// Decodes a 32-bit instruction.
pub fn decode(raw: u32) -> Decoded {
    let opcode = raw.opcode();
    let imm = match opcode {
        opcodes::OP_LOAD
        | opcodes::OP_LOAD_FP
        | opcodes::OP_IMM
        | opcodes::OP_IMM_32
        | opcodes::OP_JALR
        | opcodes::OP_MISC_MEM
        | opcodes::OP_SYSTEM => imm_i(raw),
        opcodes::OP_STORE | opcodes::OP_STORE_FP => imm_s(raw),
        opcodes::OP_BRANCH => imm_b(raw),
        opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(raw),
        opcodes::OP_JAL => imm_j(raw),
        _ => 0,
    };

    Decoded {
        raw,
        opcode,
        rd: raw.rd(),
        rs1: raw.rs1(),
        rs2: raw.rs2(),
        rs3: raw.rs3(),
        funct3: raw.funct3(),
        funct7: raw.funct7(),
        imm,
    }
}

/// Sign-extends the low `bits` of `value` to 64 bits.
#[inline]
pub const fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// I-type: `imm[11:0]` in bits 31:20.
#[inline]
const fn imm_i(raw: u32) -> i64 {
    (raw as i32 >> 20) as i64
}

/// S-type: `imm[11:5]` in bits 31:25, `imm[4:0]` in bits 11:7.
#[inline]
const fn imm_s(raw: u32) -> i64 {
    let value = ((raw >> 25) << 5) | ((raw >> 7) & 0x1F);
    sign_extend(value as u64, 12)
}

/// B-type: a 13-bit even offset scattered over bits 31, 30:25, 11:8 and 7.
#[inline]
const fn imm_b(raw: u32) -> i64 {
    let value = (((raw >> 31) & 1) << 12)
        | (((raw >> 7) & 1) << 11)
        | (((raw >> 25) & 0x3F) << 5)
        | (((raw >> 8) & 0xF) << 1);
    sign_extend(value as u64, 13)
}

/// U-type: `imm[31:12]` in place, low 12 bits zero.
#[inline]
const fn imm_u(raw: u32) -> i64 {
    (raw & 0xFFFF_F000) as i32 as i64
}

/// J-type: a 21-bit even offset scattered over bits 31, 30:21, 20 and 19:12.
#[inline]
const fn imm_j(raw: u32) -> i64 {
    let value = (((raw >> 31) & 1) << 20)
        | (raw & 0x000F_F000)
        | (((raw >> 20) & 1) << 11)
        | (((raw >> 21) & 0x3FF) << 1);
    sign_extend(value as u64, 21)
}
