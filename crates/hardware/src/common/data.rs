//! Memory access types.
//!
//! The access type decides which fault a failed bus access turns into:
//! a fetch becomes an instruction access fault, a read a load access fault,
//! and a write a store/AMO access fault. The same holds for misalignment.

use crate::common::error::Trap;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    Fetch,

    /// Data read access (loads, LR, the read half of an AMO is reported as a write).
    Read,

    /// Data write access (stores, SC, AMOs).
    Write,
}

impl AccessType {
    /// Builds the access-fault trap for an access of this type at `addr`.
    pub const fn access_fault(self, addr: u64) -> Trap {
        match self {
            Self::Fetch => Trap::InstructionAccessFault(addr),
            Self::Read => Trap::LoadAccessFault(addr),
            Self::Write => Trap::StoreAccessFault(addr),
        }
    }

    /// Builds the misaligned-address trap for an access of this type at `addr`.
    pub const fn misaligned(self, addr: u64) -> Trap {
        match self {
            Self::Fetch => Trap::InstructionAddressMisaligned(addr),
            Self::Read => Trap::LoadAddressMisaligned(addr),
            Self::Write => Trap::StoreAddressMisaligned(addr),
        }
    }
}
