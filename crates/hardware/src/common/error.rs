//! Trap and engine error definitions.
//!
//! This module defines the two failure channels of the engine:
//! 1. **Trap Representation:** Synchronous exceptions raised by a single step, carrying the
//!    value that ends up in `mtval`.
//! 2. **Engine Errors:** Construction-time failures (ISA string, memory map, allocation,
//!    configuration) reported through `thiserror`.

use std::fmt;

use thiserror::Error;

use crate::isa::cause::exception;

/// RISC-V synchronous exceptions raised by the hart.
///
/// The hart runs in machine mode only, so the page-fault and lower-privilege
/// environment-call causes never occur and are not represented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// Raised when the program counter is not aligned to the minimum instruction size.
    /// The associated value is the misaligned address.
    InstructionAddressMisaligned(u64),

    /// Instruction access fault exception.
    ///
    /// Raised when an instruction fetch touches an address outside every mapped region.
    /// The associated value is the faulting address.
    InstructionAccessFault(u64),

    /// Illegal instruction exception.
    ///
    /// Raised when an instruction encoding is invalid, belongs to a disabled extension,
    /// or names an unknown CSR. The associated value is the instruction encoding.
    IllegalInstruction(u32),

    /// Breakpoint exception. The associated value is the program counter.
    Breakpoint(u64),

    /// Load address misaligned exception.
    LoadAddressMisaligned(u64),

    /// Load access fault exception.
    LoadAccessFault(u64),

    /// Store/AMO address misaligned exception.
    StoreAddressMisaligned(u64),

    /// Store/AMO access fault exception.
    StoreAccessFault(u64),

    /// Environment call from machine mode.
    EnvironmentCallFromMMode,
}

impl Trap {
    /// Returns the exception code written to `mcause`.
    pub const fn cause(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::InstructionAccessFault(_) => exception::INSTRUCTION_ACCESS_FAULT,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => exception::BREAKPOINT,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::LoadAccessFault(_) => exception::LOAD_ACCESS_FAULT,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::StoreAccessFault(_) => exception::STORE_ACCESS_FAULT,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
        }
    }

    /// Returns the value written to `mtval` when this trap is taken.
    pub const fn tval(&self) -> u64 {
        match self {
            Self::InstructionAddressMisaligned(addr)
            | Self::InstructionAccessFault(addr)
            | Self::Breakpoint(addr)
            | Self::LoadAddressMisaligned(addr)
            | Self::LoadAccessFault(addr)
            | Self::StoreAddressMisaligned(addr)
            | Self::StoreAccessFault(addr) => *addr,
            Self::IllegalInstruction(inst) => *inst as u64,
            Self::EnvironmentCallFromMMode => 0,
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#x})")
            }
            Self::InstructionAccessFault(addr) => write!(f, "InstructionAccessFault({addr:#x})"),
            Self::IllegalInstruction(inst) => write!(f, "IllegalInstruction({inst:#x})"),
            Self::Breakpoint(pc) => write!(f, "Breakpoint({pc:#x})"),
            Self::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({addr:#x})"),
            Self::LoadAccessFault(addr) => write!(f, "LoadAccessFault({addr:#x})"),
            Self::StoreAddressMisaligned(addr) => write!(f, "StoreAddressMisaligned({addr:#x})"),
            Self::StoreAccessFault(addr) => write!(f, "StoreAccessFault({addr:#x})"),
            Self::EnvironmentCallFromMMode => write!(f, "EnvironmentCallFromMMode"),
        }
    }
}

impl std::error::Error for Trap {}

/// Failures raised while building or configuring an engine instance.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The ISA descriptor string is not an RV64 string this engine can model.
    #[error("unsupported ISA string `{0}`")]
    UnsupportedIsa(String),

    /// A memory region has zero size.
    #[error("memory region at {base:#x} is empty")]
    EmptyRegion {
        /// Base address of the offending region.
        base: u64,
    },

    /// `base + size` does not fit in the 64-bit physical address space.
    #[error("memory region at {base:#x} with size {size:#x} overflows the address space")]
    RegionOverflow {
        /// Base address of the offending region.
        base: u64,
        /// Size of the offending region in bytes.
        size: u64,
    },

    /// Two regions share at least one byte.
    #[error("memory regions at {first:#x} and {second:#x} overlap")]
    OverlappingRegions {
        /// Base of the lower region.
        first: u64,
        /// Base of the region that starts inside it.
        second: u64,
    },

    /// The host could not provide backing storage for a region.
    #[error("failed to allocate {size} bytes of guest memory")]
    AllocationFailed {
        /// Requested size in bytes.
        size: usize,
    },

    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
