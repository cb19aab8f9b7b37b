//! Function code selectors.
//!
//! Grouped by the opcode they qualify. `funct3` values occupy bits 12-14,
//! `funct5` values bits 27-31, and `funct7` values bits 25-31.

/// `funct3` selectors of `OP_IMM`, `OP_REG` and their 32-bit forms.
pub mod alu {
    /// ADD/ADDI/SUB.
    pub const ADD_SUB: u32 = 0b000;
    /// Shift left logical.
    pub const SLL: u32 = 0b001;
    /// Set less than.
    pub const SLT: u32 = 0b010;
    /// Set less than unsigned.
    pub const SLTU: u32 = 0b011;
    /// Exclusive or.
    pub const XOR: u32 = 0b100;
    /// Shift right logical/arithmetic.
    pub const SRL_SRA: u32 = 0b101;
    /// Inclusive or.
    pub const OR: u32 = 0b110;
    /// And.
    pub const AND: u32 = 0b111;
}

/// `funct7` selectors of register-register arithmetic.
pub mod funct7 {
    /// Standard encoding (ADD, SRL, ...).
    pub const DEFAULT: u32 = 0b000_0000;
    /// Alternate encoding (SUB, SRA).
    pub const SUB_SRA: u32 = 0b010_0000;
    /// M extension multiply/divide.
    pub const MULDIV: u32 = 0b000_0001;
}

/// `funct3` selectors of the M extension under `funct7::MULDIV`.
pub mod muldiv {
    /// Low 64 bits of the product.
    pub const MUL: u32 = 0b000;
    /// High bits, signed x signed.
    pub const MULH: u32 = 0b001;
    /// High bits, signed x unsigned.
    pub const MULHSU: u32 = 0b010;
    /// High bits, unsigned x unsigned.
    pub const MULHU: u32 = 0b011;
    /// Signed division.
    pub const DIV: u32 = 0b100;
    /// Unsigned division.
    pub const DIVU: u32 = 0b101;
    /// Signed remainder.
    pub const REM: u32 = 0b110;
    /// Unsigned remainder.
    pub const REMU: u32 = 0b111;
}

/// `funct3` access widths of `OP_LOAD`/`OP_STORE`/`OP_LOAD_FP`/`OP_STORE_FP`/`OP_AMO`.
pub mod width {
    /// Byte, sign-extended on load.
    pub const B: u32 = 0b000;
    /// Halfword, sign-extended on load.
    pub const H: u32 = 0b001;
    /// Word, sign-extended on load.
    pub const W: u32 = 0b010;
    /// Doubleword.
    pub const D: u32 = 0b011;
    /// Byte, zero-extended.
    pub const BU: u32 = 0b100;
    /// Halfword, zero-extended.
    pub const HU: u32 = 0b101;
    /// Word, zero-extended.
    pub const WU: u32 = 0b110;
}

/// `funct3` conditions of `OP_BRANCH`.
pub mod branch {
    /// Equal.
    pub const BEQ: u32 = 0b000;
    /// Not equal.
    pub const BNE: u32 = 0b001;
    /// Signed less than.
    pub const BLT: u32 = 0b100;
    /// Signed greater or equal.
    pub const BGE: u32 = 0b101;
    /// Unsigned less than.
    pub const BLTU: u32 = 0b110;
    /// Unsigned greater or equal.
    pub const BGEU: u32 = 0b111;
}

/// `funct3` selectors of `OP_MISC_MEM`.
pub mod misc_mem {
    /// Memory ordering fence.
    pub const FENCE: u32 = 0b000;
    /// Instruction stream fence.
    pub const FENCE_I: u32 = 0b001;
}

/// `funct3` selectors of `OP_SYSTEM`.
pub mod system {
    /// ECALL, EBREAK, MRET, WFI; distinguished by the full encoding.
    pub const PRIV: u32 = 0b000;
    /// Atomic read/write CSR.
    pub const CSRRW: u32 = 0b001;
    /// Atomic read and set bits in CSR.
    pub const CSRRS: u32 = 0b010;
    /// Atomic read and clear bits in CSR.
    pub const CSRRC: u32 = 0b011;
    /// Immediate form of CSRRW.
    pub const CSRRWI: u32 = 0b101;
    /// Immediate form of CSRRS.
    pub const CSRRSI: u32 = 0b110;
    /// Immediate form of CSRRC.
    pub const CSRRCI: u32 = 0b111;
}

/// `funct5` operations of `OP_AMO`.
pub mod amo {
    /// Load reserved.
    pub const LR: u32 = 0b00010;
    /// Store conditional.
    pub const SC: u32 = 0b00011;
    /// Atomic swap.
    pub const SWAP: u32 = 0b00001;
    /// Atomic add.
    pub const ADD: u32 = 0b00000;
    /// Atomic exclusive or.
    pub const XOR: u32 = 0b00100;
    /// Atomic and.
    pub const AND: u32 = 0b01100;
    /// Atomic or.
    pub const OR: u32 = 0b01000;
    /// Atomic signed minimum.
    pub const MIN: u32 = 0b10000;
    /// Atomic signed maximum.
    pub const MAX: u32 = 0b10100;
    /// Atomic unsigned minimum.
    pub const MINU: u32 = 0b11000;
    /// Atomic unsigned maximum.
    pub const MAXU: u32 = 0b11100;
}

/// Selectors of `OP_FP` and the FMA opcodes.
pub mod fp {
    /// Single-precision format.
    pub const FMT_S: u32 = 0b00;
    /// Double-precision format.
    pub const FMT_D: u32 = 0b01;

    /// `funct5` of FADD.
    pub const FADD: u32 = 0b00000;
    /// `funct5` of FSUB.
    pub const FSUB: u32 = 0b00001;
    /// `funct5` of FMUL.
    pub const FMUL: u32 = 0b00010;
    /// `funct5` of FDIV.
    pub const FDIV: u32 = 0b00011;
    /// `funct5` of FSGNJ/FSGNJN/FSGNJX.
    pub const FSGNJ: u32 = 0b00100;
    /// `funct5` of FMIN/FMAX.
    pub const FMIN_MAX: u32 = 0b00101;
    /// `funct5` of FCVT.S.D/FCVT.D.S.
    pub const FCVT_FP_FP: u32 = 0b01000;
    /// `funct5` of FSQRT.
    pub const FSQRT: u32 = 0b01011;
    /// `funct5` of FEQ/FLT/FLE.
    pub const FCMP: u32 = 0b10100;
    /// `funct5` of FCVT.{W,WU,L,LU}.{S,D}.
    pub const FCVT_INT_FP: u32 = 0b11000;
    /// `funct5` of FCVT.{S,D}.{W,WU,L,LU}.
    pub const FCVT_FP_INT: u32 = 0b11010;
    /// `funct5` of FMV.X.{W,D} and FCLASS.
    pub const FMV_X_F: u32 = 0b11100;
    /// `funct5` of FMV.{W,D}.X.
    pub const FMV_F_X: u32 = 0b11110;

    /// `funct3` of FSGNJ.
    pub const SGNJ: u32 = 0b000;
    /// `funct3` of FSGNJN.
    pub const SGNJN: u32 = 0b001;
    /// `funct3` of FSGNJX.
    pub const SGNJX: u32 = 0b010;

    /// `funct3` of FMIN.
    pub const MIN: u32 = 0b000;
    /// `funct3` of FMAX.
    pub const MAX: u32 = 0b001;

    /// `funct3` of FLE.
    pub const LE: u32 = 0b000;
    /// `funct3` of FLT.
    pub const LT: u32 = 0b001;
    /// `funct3` of FEQ.
    pub const EQ: u32 = 0b010;

    /// `funct3` of FMV.X.*.
    pub const MV: u32 = 0b000;
    /// `funct3` of FCLASS.
    pub const CLASS: u32 = 0b001;

    /// `rs2` selector of conversions: signed word.
    pub const CVT_W: usize = 0b00;
    /// `rs2` selector of conversions: unsigned word.
    pub const CVT_WU: usize = 0b01;
    /// `rs2` selector of conversions: signed doubleword.
    pub const CVT_L: usize = 0b10;
    /// `rs2` selector of conversions: unsigned doubleword.
    pub const CVT_LU: usize = 0b11;

    /// Rounding mode field value selecting the dynamic mode from `frm`.
    pub const RM_DYN: u32 = 0b111;
}
