//! RISC-V Compressed (C) Extension Constants.
//!
//! A parcel's quadrant is its low two bits; within a quadrant, bits 15:13 select
//! the instruction group.

/// Quadrant 0 (bits 1:0 = 00).
pub const QUADRANT_0: u16 = 0b00;
/// Quadrant 1 (bits 1:0 = 01).
pub const QUADRANT_1: u16 = 0b01;
/// Quadrant 2 (bits 1:0 = 10).
pub const QUADRANT_2: u16 = 0b10;

/// Stack pointer register index, the implicit base of the `*SP` forms.
pub const SP: u32 = 2;
/// Return address register index, written by C.JALR.
pub const RA: u32 = 1;
/// Offset added to a 3-bit compressed register field (x8..x15).
pub const CREG_BASE: u32 = 8;

/// Groups in Quadrant 0.
pub mod q0 {
    /// C.ADDI4SPN.
    pub const ADDI4SPN: u16 = 0b000;
    /// C.FLD.
    pub const FLD: u16 = 0b001;
    /// C.LW.
    pub const LW: u16 = 0b010;
    /// C.LD.
    pub const LD: u16 = 0b011;
    /// C.FSD.
    pub const FSD: u16 = 0b101;
    /// C.SW.
    pub const SW: u16 = 0b110;
    /// C.SD.
    pub const SD: u16 = 0b111;
}

/// Groups in Quadrant 1.
pub mod q1 {
    /// C.ADDI (C.NOP when rd is x0).
    pub const ADDI: u16 = 0b000;
    /// C.ADDIW.
    pub const ADDIW: u16 = 0b001;
    /// C.LI.
    pub const LI: u16 = 0b010;
    /// C.LUI, or C.ADDI16SP when rd is x2.
    pub const LUI_ADDI16SP: u16 = 0b011;
    /// C.SRLI, C.SRAI, C.ANDI and the register-register ALU group.
    pub const MISC_ALU: u16 = 0b100;
    /// C.J.
    pub const J: u16 = 0b101;
    /// C.BEQZ.
    pub const BEQZ: u16 = 0b110;
    /// C.BNEZ.
    pub const BNEZ: u16 = 0b111;
}

/// Groups in Quadrant 2.
pub mod q2 {
    /// C.SLLI.
    pub const SLLI: u16 = 0b000;
    /// C.FLDSP.
    pub const FLDSP: u16 = 0b001;
    /// C.LWSP.
    pub const LWSP: u16 = 0b010;
    /// C.LDSP.
    pub const LDSP: u16 = 0b011;
    /// C.JR, C.MV, C.EBREAK, C.JALR, C.ADD.
    pub const JR_MV_ADD: u16 = 0b100;
    /// C.FSDSP.
    pub const FSDSP: u16 = 0b101;
    /// C.SWSP.
    pub const SWSP: u16 = 0b110;
    /// C.SDSP.
    pub const SDSP: u16 = 0b111;
}
