//! C↔Rust conversions.
//!
//! Turns the C `memory_region` array into engine [`MemoryRegion`]s and engine
//! construction errors into wire codes, so the C entry points and the Rust API
//! share one validation path.

use std::ffi::{CStr, c_char, c_void};
use std::slice;

use spikelib_core::config::Config;
use spikelib_core::{EngineError, MemoryRegion};

use crate::error::SpError;

/// One memory region as laid out by C callers.
///
/// A null `content` asks the engine for zeroed storage. Otherwise `content`
/// points at `size` bytes the caller keeps alive, and untouched, until the
/// handle is released.
#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug)]
pub struct memory_region {
    /// Guest physical base address.
    pub base: u64,
    /// Size in bytes.
    pub size: u64,
    /// Caller-owned backing storage, or null.
    pub content: *mut c_void,
}

impl From<EngineError> for SpError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnsupportedIsa(_) | EngineError::AllocationFailed { .. } => {
                Self::NoMemory
            }
            EngineError::EmptyRegion { .. }
            | EngineError::RegionOverflow { .. }
            | EngineError::OverlappingRegions { .. } => Self::MapInvalid,
            EngineError::Config(_) | EngineError::Io(_) => Self::Unknown,
        }
    }
}

/// Converts a C region array.
///
/// # Errors
///
/// [`SpError::MapInvalid`] for a null array with a non-zero count or a
/// negative count.
///
/// # Safety
///
/// A non-null `regions` must point at `count` readable `memory_region`s, and
/// every non-null `content` must satisfy the contract of [`memory_region`].
pub unsafe fn regions_from_c(
    regions: *const memory_region,
    count: i32,
) -> Result<Vec<MemoryRegion>, SpError> {
    let count = usize::try_from(count).map_err(|_| SpError::MapInvalid)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    if regions.is_null() {
        return Err(SpError::MapInvalid);
    }
    // SAFETY: non-null and `count` elements long per the caller contract.
    let raw = unsafe { slice::from_raw_parts(regions, count) };
    Ok(raw
        .iter()
        .map(|r| {
            if r.content.is_null() {
                MemoryRegion::zeroed(r.base, r.size)
            } else {
                // SAFETY: the caller keeps `content` valid for `size` bytes
                // until the handle is released.
                unsafe { MemoryRegion::borrowed(r.base, r.size, r.content.cast()) }
            }
        })
        .collect())
}

/// Reads a NUL-terminated UTF-8 string.
///
/// # Safety
///
/// A non-null `ptr` must point at a NUL-terminated string.
pub unsafe fn str_from_c<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Parses a JSON engine configuration passed from C.
///
/// # Errors
///
/// [`SpError::Unknown`] for a null pointer, invalid UTF-8, or JSON the engine
/// rejects.
///
/// # Safety
///
/// As [`str_from_c`].
pub unsafe fn config_from_c(json: *const c_char) -> Result<Config, SpError> {
    // SAFETY: forwarded caller contract.
    let text = unsafe { str_from_c(json) }.ok_or(SpError::Unknown)?;
    Config::from_json(text).map_err(SpError::from)
}
