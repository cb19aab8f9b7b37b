//! `mcause` values.
//!
//! The hart only runs in machine mode and has no interrupt sources, so every
//! value it writes is one of the synchronous exception codes below.

/// Synchronous exception codes (interrupt bit clear).
pub mod exception {
    /// Fetch from a PC that is not parcel-aligned.
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u64 = 0;
    /// Fetch from an address outside every region.
    pub const INSTRUCTION_ACCESS_FAULT: u64 = 1;
    /// Undecodable, reserved, or disabled encoding.
    pub const ILLEGAL_INSTRUCTION: u64 = 2;
    /// `ebreak` or `c.ebreak`.
    pub const BREAKPOINT: u64 = 3;
    /// Load not naturally aligned.
    pub const LOAD_ADDRESS_MISALIGNED: u64 = 4;
    /// Load outside every region.
    pub const LOAD_ACCESS_FAULT: u64 = 5;
    /// Store or AMO not naturally aligned.
    pub const STORE_ADDRESS_MISALIGNED: u64 = 6;
    /// Store or AMO outside every region.
    pub const STORE_ACCESS_FAULT: u64 = 7;
    /// `ecall` from machine mode.
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u64 = 11;
}
