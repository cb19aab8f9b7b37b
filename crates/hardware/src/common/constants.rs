//! Global engine constants.
//!
//! This module defines values shared across the engine. It includes:
//! 1. **Instruction Constants:** Parcel sizes and field masks used by fetch and decode.
//! 2. **Reset Constants:** The default load address and trap vector of a freshly built hart.
//! 3. **Trap Constants:** The interrupt bit of `mcause`.

/// Bit mask for extracting the opcode field from a RISC-V instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Size of a compressed (16-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_16: u64 = 2;

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE_32: u64 = 4;

/// Bit mask for checking if an instruction is compressed.
pub const COMPRESSED_INSTRUCTION_MASK: u16 = 0x3;

/// Value of the low two bits that marks a full 32-bit instruction.
pub const COMPRESSED_INSTRUCTION_VALUE: u16 = 0x3;

/// Bit mask for extracting a 5-bit register field.
pub const REG_FIELD_MASK: u32 = 0x1F;

/// Program counter a new hart starts at.
pub const DEFAULT_START_PC: u64 = 0x1000;

/// Trap vector a new hart jumps to when an exception is taken.
pub const DEFAULT_TRAP_VECTOR: u64 = 0;

/// ISA descriptor used when the caller does not provide one.
pub const DEFAULT_ISA: &str = "RV64IMAFDC";

/// Bit mask indicating that a trap cause represents an interrupt.
pub const CAUSE_INTERRUPT_BIT: u64 = 1 << 63;
