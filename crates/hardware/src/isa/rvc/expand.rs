//! Compressed Instruction Expansion.
//!
//! [`expand`] rewrites a 16-bit parcel into its 32-bit equivalent. Reserved and
//! illegal parcels, including the all-zero parcel, expand to `0`, which is itself
//! an illegal 32-bit encoding and therefore raises the right trap downstream.

use super::constants::{CREG_BASE, QUADRANT_0, QUADRANT_1, QUADRANT_2, RA, SP, q0, q1, q2};
use crate::isa::funct::{alu, branch, funct7, width};
use crate::isa::opcodes;

/// Expansion result of a reserved or illegal parcel.
const ILLEGAL: u32 = 0;

/// Expands a 16-bit RVC instruction into its 32-bit equivalent.
pub fn expand(inst: u16) -> u32 {
    let group = (inst >> 13) & 0x7;
    match inst & 0x3 {
        QUADRANT_0 => expand_q0(inst, group),
        QUADRANT_1 => expand_q1(inst, group),
        QUADRANT_2 => expand_q2(inst, group),
        _ => ILLEGAL,
    }
}

fn expand_q0(inst: u16, group: u16) -> u32 {
    let rs1 = creg(inst, 7);
    let rd_rs2 = creg(inst, 2);
    match group {
        q0::ADDI4SPN => {
            let imm = (bits(inst, 11, 2) << 4)
                | (bits(inst, 7, 4) << 6)
                | (bits(inst, 6, 1) << 2)
                | (bits(inst, 5, 1) << 3);
            if imm == 0 {
                return ILLEGAL;
            }
            i_type(imm as i32, SP, alu::ADD_SUB, rd_rs2, opcodes::OP_IMM)
        }
        q0::FLD => i_type(
            scaled8(inst) as i32,
            rs1,
            width::D,
            rd_rs2,
            opcodes::OP_LOAD_FP,
        ),
        q0::LW => i_type(scaled4(inst) as i32, rs1, width::W, rd_rs2, opcodes::OP_LOAD),
        q0::LD => i_type(scaled8(inst) as i32, rs1, width::D, rd_rs2, opcodes::OP_LOAD),
        q0::FSD => s_type(
            scaled8(inst) as i32,
            rd_rs2,
            rs1,
            width::D,
            opcodes::OP_STORE_FP,
        ),
        q0::SW => s_type(scaled4(inst) as i32, rd_rs2, rs1, width::W, opcodes::OP_STORE),
        q0::SD => s_type(scaled8(inst) as i32, rd_rs2, rs1, width::D, opcodes::OP_STORE),
        _ => ILLEGAL,
    }
}

fn expand_q1(inst: u16, group: u16) -> u32 {
    let rd = bits(inst, 7, 5);
    let imm6 = sext((bits(inst, 12, 1) << 5) | bits(inst, 2, 5), 6);
    match group {
        q1::ADDI => i_type(imm6, rd, alu::ADD_SUB, rd, opcodes::OP_IMM),
        q1::ADDIW => {
            if rd == 0 {
                return ILLEGAL;
            }
            i_type(imm6, rd, alu::ADD_SUB, rd, opcodes::OP_IMM_32)
        }
        q1::LI => i_type(imm6, 0, alu::ADD_SUB, rd, opcodes::OP_IMM),
        q1::LUI_ADDI16SP if rd == SP => {
            let imm = sext(
                (bits(inst, 12, 1) << 9)
                    | (bits(inst, 3, 2) << 7)
                    | (bits(inst, 5, 1) << 6)
                    | (bits(inst, 2, 1) << 5)
                    | (bits(inst, 6, 1) << 4),
                10,
            );
            if imm == 0 {
                return ILLEGAL;
            }
            i_type(imm, SP, alu::ADD_SUB, SP, opcodes::OP_IMM)
        }
        q1::LUI_ADDI16SP => {
            if imm6 == 0 {
                return ILLEGAL;
            }
            ((imm6 as u32) << 12) | (rd << 7) | opcodes::OP_LUI
        }
        q1::MISC_ALU => expand_q1_alu(inst),
        q1::J => {
            let offset = sext(
                (bits(inst, 12, 1) << 11)
                    | (bits(inst, 8, 1) << 10)
                    | (bits(inst, 9, 2) << 8)
                    | (bits(inst, 6, 1) << 7)
                    | (bits(inst, 7, 1) << 6)
                    | (bits(inst, 2, 1) << 5)
                    | (bits(inst, 11, 1) << 4)
                    | (bits(inst, 3, 3) << 1),
                12,
            );
            j_type(offset, 0)
        }
        q1::BEQZ | q1::BNEZ => {
            let offset = sext(
                (bits(inst, 12, 1) << 8)
                    | (bits(inst, 5, 2) << 6)
                    | (bits(inst, 2, 1) << 5)
                    | (bits(inst, 10, 2) << 3)
                    | (bits(inst, 3, 2) << 1),
                9,
            );
            let cond = if group == q1::BEQZ {
                branch::BEQ
            } else {
                branch::BNE
            };
            b_type(offset, 0, creg(inst, 7), cond)
        }
        _ => ILLEGAL,
    }
}

fn expand_q1_alu(inst: u16) -> u32 {
    let rd = creg(inst, 7);
    let rs2 = creg(inst, 2);
    let shamt = (bits(inst, 12, 1) << 5) | bits(inst, 2, 5);
    match bits(inst, 10, 2) {
        0b00 => i_type(shamt as i32, rd, alu::SRL_SRA, rd, opcodes::OP_IMM),
        0b01 => i_type(
            ((funct7::SUB_SRA << 5) | shamt) as i32,
            rd,
            alu::SRL_SRA,
            rd,
            opcodes::OP_IMM,
        ),
        0b10 => {
            let imm = sext(shamt, 6);
            i_type(imm, rd, alu::AND, rd, opcodes::OP_IMM)
        }
        _ => {
            let (f7, f3, opcode) = match (bits(inst, 12, 1), bits(inst, 5, 2)) {
                (0, 0b00) => (funct7::SUB_SRA, alu::ADD_SUB, opcodes::OP_REG),
                (0, 0b01) => (funct7::DEFAULT, alu::XOR, opcodes::OP_REG),
                (0, 0b10) => (funct7::DEFAULT, alu::OR, opcodes::OP_REG),
                (0, 0b11) => (funct7::DEFAULT, alu::AND, opcodes::OP_REG),
                (1, 0b00) => (funct7::SUB_SRA, alu::ADD_SUB, opcodes::OP_REG_32),
                (1, 0b01) => (funct7::DEFAULT, alu::ADD_SUB, opcodes::OP_REG_32),
                _ => return ILLEGAL,
            };
            r_type(f7, rs2, rd, f3, rd, opcode)
        }
    }
}

fn expand_q2(inst: u16, group: u16) -> u32 {
    let rd = bits(inst, 7, 5);
    let rs2 = bits(inst, 2, 5);
    match group {
        q2::SLLI => {
            let shamt = (bits(inst, 12, 1) << 5) | rs2;
            i_type(shamt as i32, rd, alu::SLL, rd, opcodes::OP_IMM)
        }
        q2::FLDSP => i_type(sp_load8(inst) as i32, SP, width::D, rd, opcodes::OP_LOAD_FP),
        q2::LWSP => {
            if rd == 0 {
                return ILLEGAL;
            }
            let imm = (bits(inst, 12, 1) << 5) | (bits(inst, 4, 3) << 2) | (bits(inst, 2, 2) << 6);
            i_type(imm as i32, SP, width::W, rd, opcodes::OP_LOAD)
        }
        q2::LDSP => {
            if rd == 0 {
                return ILLEGAL;
            }
            i_type(sp_load8(inst) as i32, SP, width::D, rd, opcodes::OP_LOAD)
        }
        q2::JR_MV_ADD => match (bits(inst, 12, 1), rd, rs2) {
            (0, 0, 0) => ILLEGAL,
            (0, _, 0) => i_type(0, rd, 0, 0, opcodes::OP_JALR),
            (0, _, _) => r_type(funct7::DEFAULT, rs2, 0, alu::ADD_SUB, rd, opcodes::OP_REG),
            (_, 0, 0) => opcodes::EBREAK,
            (_, _, 0) => i_type(0, rd, 0, RA, opcodes::OP_JALR),
            _ => r_type(funct7::DEFAULT, rs2, rd, alu::ADD_SUB, rd, opcodes::OP_REG),
        },
        q2::FSDSP => s_type(sp_store8(inst) as i32, rs2, SP, width::D, opcodes::OP_STORE_FP),
        q2::SWSP => {
            let imm = (bits(inst, 9, 4) << 2) | (bits(inst, 7, 2) << 6);
            s_type(imm as i32, rs2, SP, width::W, opcodes::OP_STORE)
        }
        q2::SDSP => s_type(sp_store8(inst) as i32, rs2, SP, width::D, opcodes::OP_STORE),
        _ => ILLEGAL,
    }
}

/// Extracts `len` bits of `inst` starting at bit `lo`.
#[inline]
const fn bits(inst: u16, lo: u32, len: u32) -> u32 {
    ((inst as u32) >> lo) & ((1u32 << len) - 1)
}

/// Decodes a 3-bit compressed register field at bit `lo`.
#[inline]
const fn creg(inst: u16, lo: u32) -> u32 {
    CREG_BASE + bits(inst, lo, 3)
}

/// Sign-extends the low `width` bits of `value`.
#[inline]
const fn sext(value: u32, width: u32) -> i32 {
    let shift = 32 - width;
    ((value << shift) as i32) >> shift
}

/// Word offset of C.LW/C.SW: `uimm[5:3]` in 12:10, `uimm[2]` in 6, `uimm[6]` in 5.
#[inline]
const fn scaled4(inst: u16) -> u32 {
    (bits(inst, 10, 3) << 3) | (bits(inst, 6, 1) << 2) | (bits(inst, 5, 1) << 6)
}

/// Doubleword offset of C.LD/C.SD/C.FLD/C.FSD: `uimm[5:3]` in 12:10, `uimm[7:6]` in 6:5.
#[inline]
const fn scaled8(inst: u16) -> u32 {
    (bits(inst, 10, 3) << 3) | (bits(inst, 5, 2) << 6)
}

/// Offset of C.LDSP/C.FLDSP: `uimm[5]` in 12, `uimm[4:3]` in 6:5, `uimm[8:6]` in 4:2.
#[inline]
const fn sp_load8(inst: u16) -> u32 {
    (bits(inst, 12, 1) << 5) | (bits(inst, 5, 2) << 3) | (bits(inst, 2, 3) << 6)
}

/// Offset of C.SDSP/C.FSDSP: `uimm[5:3]` in 12:10, `uimm[8:6]` in 9:7.
#[inline]
const fn sp_store8(inst: u16) -> u32 {
    (bits(inst, 10, 3) << 3) | (bits(inst, 7, 3) << 6)
}

#[inline]
const fn r_type(f7: u32, rs2: u32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    (f7 << 25) | (rs2 << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

#[inline]
const fn i_type(imm: i32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    (((imm as u32) & 0xFFF) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

#[inline]
const fn s_type(imm: i32, rs2: u32, rs1: u32, f3: u32, opcode: u32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | ((imm & 0x1F) << 7)
        | opcode
}

#[inline]
const fn b_type(offset: i32, rs2: u32, rs1: u32, f3: u32) -> u32 {
    let imm = offset as u32;
    (((imm >> 12) & 1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 1) << 7)
        | opcodes::OP_BRANCH
}

#[inline]
const fn j_type(offset: i32, rd: u32) -> u32 {
    let imm = offset as u32;
    (((imm >> 20) & 1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | (rd << 7)
        | opcodes::OP_JAL
}
