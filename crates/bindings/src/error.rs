//! Error taxonomy of the C ABI.
//!
//! Every entry point reports one of the codes below. The numbering is a wire
//! contract: codes are never renumbered or reused, and [`ABI_VERSION`] changes
//! whenever the set does.

use std::ffi::CStr;

use thiserror::Error;

/// Version of the error numbering and register-id contract.
pub const ABI_VERSION: u32 = 1;

/// Status codes returned across the C ABI.
///
/// `Ok` is part of the enumeration because the C side receives it as a plain
/// integer; the Rust API only ever puts the other variants in an `Err`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[repr(i32)]
pub enum SpError {
    /// No error.
    #[error("{}", self.message().to_string_lossy())]
    Ok = 0,
    /// The execution deadline passed before `end` was reached.
    #[error("{}", self.message().to_string_lossy())]
    Timeout = 1,
    /// The instruction cap was reached before `end`.
    #[error("{}", self.message().to_string_lossy())]
    MaxCountReached = 2,
    /// Engine construction failed.
    #[error("{}", self.message().to_string_lossy())]
    NoMemory = 3,
    /// A load touched unmapped memory.
    #[error("{}", self.message().to_string_lossy())]
    ReadUnmapped = 4,
    /// A store touched unmapped memory.
    #[error("{}", self.message().to_string_lossy())]
    WriteUnmapped = 5,
    /// An instruction fetch touched unmapped memory.
    #[error("{}", self.message().to_string_lossy())]
    FetchUnmapped = 6,
    /// A load address was not aligned.
    #[error("{}", self.message().to_string_lossy())]
    ReadMisaligned = 7,
    /// A store address was not aligned.
    #[error("{}", self.message().to_string_lossy())]
    WriteMisaligned = 8,
    /// The PC was not aligned.
    #[error("{}", self.message().to_string_lossy())]
    FetchMisaligned = 9,
    /// A register id outside the enumeration.
    #[error("{}", self.message().to_string_lossy())]
    RegisterIdInvalid = 10,
    /// The hart hit an illegal or unsupported encoding.
    #[error("{}", self.message().to_string_lossy())]
    InstructionInvalid = 11,
    /// The memory region list was rejected.
    #[error("{}", self.message().to_string_lossy())]
    MapInvalid = 12,
    /// Anything else, including a null handle.
    #[error("{}", self.message().to_string_lossy())]
    Unknown = 13,
}

impl SpError {
    /// Every code, in numeric order.
    pub const ALL: [Self; 14] = [
        Self::Ok,
        Self::Timeout,
        Self::MaxCountReached,
        Self::NoMemory,
        Self::ReadUnmapped,
        Self::WriteUnmapped,
        Self::FetchUnmapped,
        Self::ReadMisaligned,
        Self::WriteMisaligned,
        Self::FetchMisaligned,
        Self::RegisterIdInvalid,
        Self::InstructionInvalid,
        Self::MapInvalid,
        Self::Unknown,
    ];

    /// Integer value on the wire.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Inverse of [`SpError::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Text of the code, NUL-terminated for `sp_strerror`. `Display` prints the
    /// same text.
    pub const fn message(self) -> &'static CStr {
        match self {
            Self::Ok => c"OK (SP_ERR_OK)",
            Self::Timeout => c"Execution timeout (SP_ERR_TIMEOUT)",
            Self::MaxCountReached => c"Maximum instruction count reached (SP_ERR_MAX_COUNT_REACHED)",
            Self::NoMemory => c"No memory available or memory not present (SP_ERR_NO_MEM)",
            Self::ReadUnmapped => c"Invalid memory read (SP_ERR_READ_UNMAPPED)",
            Self::WriteUnmapped => c"Invalid memory write (SP_ERR_WRITE_UNMAPPED)",
            Self::FetchUnmapped => c"Invalid memory fetch (SP_ERR_FETCH_UNMAPPED)",
            Self::ReadMisaligned => c"Read from unaligned memory (SP_ERR_READ_MISALIGNED)",
            Self::WriteMisaligned => c"Write to unaligned memory (SP_ERR_WRITE_MISALIGNED)",
            Self::FetchMisaligned => c"Fetch from unaligned memory (SP_ERR_FETCH_MISALIGNED)",
            Self::RegisterIdInvalid => c"Invalid register id (SP_ERR_REGID_INVALID)",
            Self::InstructionInvalid => c"Invalid instruction (SP_ERR_INSN_INVALID)",
            Self::MapInvalid => c"Invalid memory mapping (SP_ERR_MAP_INVALID)",
            Self::Unknown => c"Unexpected error (SP_ERR_UNKNOWN)",
        }
    }

    /// Collapses a façade result into its wire code.
    pub fn code_of(result: Result<(), Self>) -> i32 {
        result.err().unwrap_or(Self::Ok).code()
    }
}

/// Text for any integer, including ones outside the enumeration.
pub fn strerror(code: i32) -> &'static CStr {
    SpError::from_code(code).map_or(c"Unknown error code", SpError::message)
}
