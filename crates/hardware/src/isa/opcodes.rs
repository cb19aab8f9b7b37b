//! Major opcodes (bits 0-6) and fixed system encodings.

/// Integer loads (LB, LH, LW, LD, LBU, LHU, LWU).
pub const OP_LOAD: u32 = 0b000_0011;
/// Floating-point loads (FLW, FLD).
pub const OP_LOAD_FP: u32 = 0b000_0111;
/// Memory ordering (FENCE, FENCE.I).
pub const OP_MISC_MEM: u32 = 0b000_1111;
/// Register-immediate arithmetic.
pub const OP_IMM: u32 = 0b001_0011;
/// Add upper immediate to PC.
pub const OP_AUIPC: u32 = 0b001_0111;
/// 32-bit register-immediate arithmetic (ADDIW, SLLIW, SRLIW, SRAIW).
pub const OP_IMM_32: u32 = 0b001_1011;
/// Integer stores (SB, SH, SW, SD).
pub const OP_STORE: u32 = 0b010_0011;
/// Floating-point stores (FSW, FSD).
pub const OP_STORE_FP: u32 = 0b010_0111;
/// Atomic memory operations.
pub const OP_AMO: u32 = 0b010_1111;
/// Register-register arithmetic, including M.
pub const OP_REG: u32 = 0b011_0011;
/// Load upper immediate.
pub const OP_LUI: u32 = 0b011_0111;
/// 32-bit register-register arithmetic, including M word forms.
pub const OP_REG_32: u32 = 0b011_1011;
/// Fused multiply-add.
pub const OP_FMADD: u32 = 0b100_0011;
/// Fused multiply-subtract.
pub const OP_FMSUB: u32 = 0b100_0111;
/// Negated fused multiply-subtract.
pub const OP_FNMSUB: u32 = 0b100_1011;
/// Negated fused multiply-add.
pub const OP_FNMADD: u32 = 0b100_1111;
/// Floating-point computational instructions.
pub const OP_FP: u32 = 0b101_0011;
/// Conditional branches.
pub const OP_BRANCH: u32 = 0b110_0011;
/// Jump and link register.
pub const OP_JALR: u32 = 0b110_0111;
/// Jump and link.
pub const OP_JAL: u32 = 0b110_1111;
/// Environment calls, trap returns, and CSR access.
pub const OP_SYSTEM: u32 = 0b111_0011;

/// Environment call.
pub const ECALL: u32 = 0x0000_0073;
/// Breakpoint.
pub const EBREAK: u32 = 0x0010_0073;
/// Return from machine-mode trap.
pub const MRET: u32 = 0x3020_0073;
/// Wait for interrupt.
pub const WFI: u32 = 0x1050_0073;
