//! The C entry points, called the way a C host would.

use std::ffi::{CStr, c_void};
use std::ptr;

use pretty_assertions::assert_eq;
use spikelib::ffi::*;
use spikelib::{ABI_VERSION, RegId, SpError, memory_region};

use crate::common::encode::{addi, image};
use crate::common::harness::{RAM_BASE, RAM_SIZE};

const OK: i32 = SpError::Ok as i32;

fn region(content: *mut c_void) -> memory_region {
    memory_region {
        base: RAM_BASE,
        size: RAM_SIZE,
        content,
    }
}

/// A default handle over one zeroed region.
fn create() -> *mut c_void {
    let regions = [region(ptr::null_mut())];
    // SAFETY: the array outlives the call and has no borrowed contents.
    let handle = unsafe { initialize_sim(regions.as_ptr(), 1) };
    assert!(!handle.is_null());
    handle
}

#[test]
fn null_handle_is_unknown_everywhere() {
    let unknown = SpError::Unknown as i32;
    let mut value = 0u64;
    let mut byte = 0u8;
    // SAFETY: a null handle is checked before anything is dereferenced.
    unsafe {
        assert_eq!(read_register(ptr::null_mut(), 0, &mut value), unknown);
        assert_eq!(write_register(ptr::null_mut(), 0, &value), unknown);
        assert_eq!(
            read_memory(ptr::null_mut(), RAM_BASE, 1, (&raw mut byte).cast()),
            unknown
        );
        assert_eq!(
            write_memory(ptr::null_mut(), RAM_BASE, 1, (&raw const byte).cast()),
            unknown
        );
        assert_eq!(spike_start(ptr::null_mut(), 0, 4, 0, 0), unknown);
        assert_eq!(get_fault_cause(ptr::null_mut()), unknown);
        release_sim(ptr::null_mut());
    }
}

#[test]
fn strerror_covers_every_code_and_beyond() {
    for code in 0..=13 {
        // SAFETY: `sp_strerror` never returns null.
        let text = unsafe { CStr::from_ptr(sp_strerror(code)) };
        assert_eq!(text, SpError::from_code(code).unwrap().message());
    }
    // SAFETY: as above.
    let text = unsafe { CStr::from_ptr(sp_strerror(99)) };
    assert_eq!(text.to_str().unwrap(), "Unknown error code");
    assert_eq!(sp_abi_version(), ABI_VERSION);
}

#[test]
fn bad_construction_returns_null() {
    let regions = [region(ptr::null_mut())];
    let overlapping = [region(ptr::null_mut()), region(ptr::null_mut())];
    // SAFETY: every array and string outlives its call.
    unsafe {
        assert!(initialize_sim_with_isa(regions.as_ptr(), 1, c"RV32I".as_ptr()).is_null());
        assert!(initialize_sim_with_isa(regions.as_ptr(), 1, ptr::null()).is_null());
        assert!(initialize_sim_with_config(regions.as_ptr(), 1, c"{".as_ptr()).is_null());
        assert!(initialize_sim(overlapping.as_ptr(), 2).is_null());
        assert!(initialize_sim(ptr::null(), 1).is_null());
        assert!(initialize_sim(regions.as_ptr(), -1).is_null());
    }
}

#[test]
fn isa_and_config_constructors_build() {
    let regions = [region(ptr::null_mut())];
    // SAFETY: every array and string outlives its call; handles are released once.
    unsafe {
        let h = initialize_sim_with_isa(regions.as_ptr(), 1, c"rv64imac".as_ptr());
        assert!(!h.is_null());
        release_sim(h);

        let json = c"{\"general\": {\"isa\": \"rv64gc\"}, \"icache\": {\"enabled\": false}}";
        let h = initialize_sim_with_config(regions.as_ptr(), 1, json.as_ptr());
        assert!(!h.is_null());
        release_sim(h);
    }
}

#[test]
fn registers_through_the_c_surface() {
    let h = create();
    // SAFETY: `h` is live until `release_sim`; value pointers are locals.
    unsafe {
        let written = 0xCAFE_F00D_u64;
        assert_eq!(write_register(h, 7, &written), OK);
        let mut value = 0u64;
        assert_eq!(read_register(h, 7, &mut value), OK);
        assert_eq!(value, written);

        let mut untouched = 0x5A5A_u64;
        let invalid = SpError::RegisterIdInvalid as i32;
        assert_eq!(read_register(h, RegId::COUNT, &mut untouched), invalid);
        assert_eq!(read_register(h, -1, &mut untouched), invalid);
        assert_eq!(untouched, 0x5A5A);
        assert_eq!(write_register(h, 99, &written), invalid);

        assert_eq!(read_register(h, 7, ptr::null_mut()), SpError::Unknown as i32);
        release_sim(h);
    }
}

#[test]
fn memory_through_the_c_surface() {
    let h = create();
    // SAFETY: `h` is live until `release_sim`; buffers are locals of the given size.
    unsafe {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        assert_eq!(write_memory(h, RAM_BASE, 12, data.as_ptr().cast()), OK);
        let mut back = [0u8; 12];
        assert_eq!(read_memory(h, RAM_BASE, 12, back.as_mut_ptr().cast()), OK);
        assert_eq!(back, data);

        assert_eq!(
            write_memory(h, RAM_BASE + 1, 1, data.as_ptr().cast()),
            SpError::WriteMisaligned as i32
        );
        assert_eq!(read_memory(h, RAM_BASE, 0, ptr::null_mut()), OK);
        assert_eq!(read_memory(h, RAM_BASE, 4, ptr::null_mut()), SpError::Unknown as i32);
        release_sim(h);
    }
}

#[test]
fn run_and_classify_through_the_c_surface() {
    let h = create();
    let program = image(&[addi(1, 0, 3), addi(1, 1, 4)]);
    // SAFETY: `h` is live until `release_sim`; buffers are locals of the given size.
    unsafe {
        assert_eq!(
            write_memory(h, RAM_BASE, program.len() as u64, program.as_ptr().cast()),
            OK
        );
        assert_eq!(spike_start(h, RAM_BASE, RAM_BASE + 8, 1000, 100), OK);
        let mut x1 = 0u64;
        assert_eq!(read_register(h, 1, &mut x1), OK);
        assert_eq!(x1, 7);
        assert_eq!(get_fault_cause(h), OK);

        // Zeroed memory past the program is an illegal parcel.
        assert_eq!(
            spike_start(h, RAM_BASE + 8, RAM_BASE + 0x800, 0, 0),
            SpError::InstructionInvalid as i32
        );
        assert_eq!(get_fault_cause(h), SpError::InstructionInvalid as i32);
        release_sim(h);
    }
}

#[test]
fn borrowed_content_is_the_guest_memory() {
    let mut backing = vec![0u8; RAM_SIZE as usize];
    backing[0x10..0x18].copy_from_slice(&0x1122_3344_5566_7788_u64.to_le_bytes());
    let regions = [region(backing.as_mut_ptr().cast())];

    // SAFETY: `backing` outlives the handle and is not touched until release.
    unsafe {
        let h = initialize_sim(regions.as_ptr(), 1);
        assert!(!h.is_null());

        let mut word = 0u64;
        assert_eq!(read_memory(h, RAM_BASE + 0x10, 8, (&raw mut word).cast()), OK);
        assert_eq!(word, 0x1122_3344_5566_7788);

        let stored = 0xA5A5_u16;
        assert_eq!(write_memory(h, RAM_BASE + 0x20, 2, (&raw const stored).cast()), OK);
        release_sim(h);
    }

    assert_eq!(&backing[0x20..0x22], &[0xA5, 0xA5]);
}
