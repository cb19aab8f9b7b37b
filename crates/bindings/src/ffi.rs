//! `extern "C"` entry points.
//!
//! Thin wrappers over the Rust API. Handles cross the boundary as opaque
//! `void*`; every status is an [`SpError`] code. A null handle yields
//! [`SpError::Unknown`], and no panic unwinds into the caller.

use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;
use std::time::Duration;

use libc::{c_char, c_int, c_void, size_t};
use spikelib_core::MemoryRegion;
use tracing::warn;

use crate::conversion::{config_from_c, memory_region, regions_from_c, str_from_c};
use crate::error::{ABI_VERSION, SpError, strerror};
use crate::register::RegId;
use crate::system::SimHandle;
use crate::utils::init_logging;

/// Runs `op`, turning a panic into [`SpError::Unknown`].
fn guarded(op: impl FnOnce() -> Result<(), SpError>) -> c_int {
    let result = panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|_| {
        warn!("panic caught at the C boundary");
        Err(SpError::Unknown)
    });
    SpError::code_of(result)
}

/// Borrows the handle behind an opaque pointer.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by `initialize_sim*`.
unsafe fn handle_mut<'a>(handle: *mut c_void) -> Result<&'a mut SimHandle, SpError> {
    // SAFETY: forwarded caller contract.
    unsafe { handle.cast::<SimHandle>().as_mut() }.ok_or(SpError::Unknown)
}

/// Shared tail of the `initialize_sim*` family.
///
/// # Safety
///
/// As [`regions_from_c`].
unsafe fn create(
    regions: *const memory_region,
    count: c_int,
    build: impl FnOnce(Vec<MemoryRegion>) -> Result<SimHandle, SpError>,
) -> *mut c_void {
    init_logging();
    // SAFETY: forwarded caller contract.
    let built = unsafe { regions_from_c(regions, count) }.and_then(build);
    match built {
        Ok(handle) => Box::into_raw(Box::new(handle)).cast(),
        Err(err) => {
            warn!(%err, count, "initialize_sim failed");
            ptr::null_mut()
        }
    }
}

/// Creates an RV64IMAFDC simulator over `count` regions.
///
/// Returns null on failure.
///
/// # Safety
///
/// `regions` must point at `count` valid `memory_region`s (or be null with a
/// zero count). Non-null region contents must stay valid and otherwise unused
/// until [`release_sim`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn initialize_sim(
    regions: *const memory_region,
    count: c_int,
) -> *mut c_void {
    // SAFETY: forwarded caller contract.
    unsafe { create(regions, count, SimHandle::new) }
}

/// Creates a simulator with the given ISA descriptor, e.g. `"RV64IMAC"`.
///
/// Returns null on failure, including a null or non-UTF-8 `isa`.
///
/// # Safety
///
/// As [`initialize_sim`]; `isa` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn initialize_sim_with_isa(
    regions: *const memory_region,
    count: c_int,
    isa: *const c_char,
) -> *mut c_void {
    // SAFETY: forwarded caller contract.
    let Some(isa) = (unsafe { str_from_c(isa) }) else {
        warn!("initialize_sim_with_isa: missing or invalid ISA string");
        return ptr::null_mut();
    };
    // SAFETY: forwarded caller contract.
    unsafe { create(regions, count, |r| SimHandle::with_isa(r, isa)) }
}

/// Creates a simulator from a JSON engine configuration.
///
/// Returns null on failure, including malformed JSON.
///
/// # Safety
///
/// As [`initialize_sim`]; `json` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn initialize_sim_with_config(
    regions: *const memory_region,
    count: c_int,
    json: *const c_char,
) -> *mut c_void {
    init_logging();
    // SAFETY: forwarded caller contract.
    let config = match unsafe { config_from_c(json) } {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, "initialize_sim_with_config: configuration rejected");
            return ptr::null_mut();
        }
    };
    // SAFETY: forwarded caller contract.
    unsafe { create(regions, count, |r| SimHandle::with_config(r, &config)) }
}

/// Destroys a simulator. A null handle is ignored.
///
/// # Safety
///
/// `handle` must be null or a pointer from `initialize_sim*` that has not been
/// released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn release_sim(handle: *mut c_void) {
    if handle.is_null() {
        return;
    }
    // SAFETY: the pointer came from `Box::into_raw` in `create` and is released once.
    let handle = unsafe { Box::from_raw(handle.cast::<SimHandle>()) };
    handle.release();
}

/// Reads register `regid` into `*value`.
///
/// # Safety
///
/// `handle` as for [`release_sim`]; `value` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn read_register(handle: *mut c_void, regid: c_int, value: *mut u64) -> c_int {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let sim = unsafe { handle_mut(handle) }?;
        let id = RegId::try_from(regid)?;
        if value.is_null() {
            return Err(SpError::Unknown);
        }
        // SAFETY: non-null and writable per the caller contract.
        unsafe { value.write(sim.read_register_bits(id)) };
        Ok(())
    })
}

/// Writes `*value` into register `regid`.
///
/// # Safety
///
/// `handle` as for [`release_sim`]; `value` must be null or readable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn write_register(
    handle: *mut c_void,
    regid: c_int,
    value: *const u64,
) -> c_int {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let sim = unsafe { handle_mut(handle) }?;
        let id = RegId::try_from(regid)?;
        if value.is_null() {
            return Err(SpError::Unknown);
        }
        // SAFETY: non-null and readable per the caller contract.
        sim.write_register_bits(id, unsafe { value.read() });
        Ok(())
    })
}

/// Copies `size` bytes of guest memory at `addr` into `value`.
///
/// # Safety
///
/// `handle` as for [`release_sim`]; `value` must be writable for `size` bytes
/// (it may be null when `size` is zero).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn read_memory(
    handle: *mut c_void,
    addr: u64,
    size: u64,
    value: *mut c_void,
) -> c_int {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let sim = unsafe { handle_mut(handle) }?;
        let len = usize::try_from(size).map_err(|_| SpError::Unknown)?;
        let buf: &mut [u8] = if len == 0 {
            &mut []
        } else if value.is_null() {
            return Err(SpError::Unknown);
        } else {
            // SAFETY: non-null and writable for `len` bytes per the caller contract.
            unsafe { slice::from_raw_parts_mut(value.cast(), len) }
        };
        sim.read_memory(addr, buf)
    })
}

/// Copies `size` bytes from `value` into guest memory at `addr`.
///
/// # Safety
///
/// `handle` as for [`release_sim`]; `value` must be readable for `size` bytes
/// (it may be null when `size` is zero).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn write_memory(
    handle: *mut c_void,
    addr: u64,
    size: u64,
    value: *const c_void,
) -> c_int {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let sim = unsafe { handle_mut(handle) }?;
        let len = usize::try_from(size).map_err(|_| SpError::Unknown)?;
        let data: &[u8] = if len == 0 {
            &[]
        } else if value.is_null() {
            return Err(SpError::Unknown);
        } else {
            // SAFETY: non-null and readable for `len` bytes per the caller contract.
            unsafe { slice::from_raw_parts(value.cast(), len) }
        };
        sim.write_memory(addr, data)
    })
}

/// Runs from `begin` until the PC reaches `end`.
///
/// `timeout_ms` and `max_insns` of zero mean unbounded.
///
/// # Safety
///
/// `handle` as for [`release_sim`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn spike_start(
    handle: *mut c_void,
    begin: u64,
    end: u64,
    timeout_ms: u64,
    max_insns: size_t,
) -> c_int {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let sim = unsafe { handle_mut(handle) }?;
        let report = sim.spike_start(begin, end, Duration::from_millis(timeout_ms), max_insns);
        report.into_result().map(drop)
    })
}

/// Classifies the hart's last trap.
///
/// # Safety
///
/// `handle` as for [`release_sim`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_fault_cause(handle: *mut c_void) -> c_int {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let sim = unsafe { handle_mut(handle) }?;
        match sim.fault_cause() {
            SpError::Ok => Ok(()),
            code => Err(code),
        }
    })
}

/// Static description of an error code. Never null.
#[unsafe(no_mangle)]
pub extern "C" fn sp_strerror(code: c_int) -> *const c_char {
    strerror(code).as_ptr()
}

/// Version of the error and register numbering.
#[unsafe(no_mangle)]
pub extern "C" fn sp_abi_version() -> u32 {
    ABI_VERSION
}
