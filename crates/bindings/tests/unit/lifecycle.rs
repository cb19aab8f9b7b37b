use rstest::rstest;
use spikelib::{SimHandle, SpError};
use spikelib_core::{Config, MemoryRegion};

use crate::common::harness::{RAM_BASE, ram};

#[test]
fn default_handle_reports_its_isa() {
    let h = SimHandle::new(ram()).unwrap();
    assert_eq!(h.simulator().cpu.isa.name(), "RV64IMAFDC");
    assert!(format!("{h:?}").contains("RV64IMAFDC"));
    h.release();
}

#[rstest]
#[case("rv64imac")]
#[case("RV64GC")]
#[case("rv64i")]
fn accepted_isa_strings(#[case] isa: &str) {
    assert!(SimHandle::with_isa(ram(), isa).is_ok());
}

#[rstest]
#[case("RV32IMAC")]
#[case("rv64imafdcv")]
#[case("")]
fn rejected_isa_is_no_memory(#[case] isa: &str) {
    assert_eq!(SimHandle::with_isa(ram(), isa).err(), Some(SpError::NoMemory));
}

#[test]
fn overlapping_regions_are_map_invalid() {
    let regions = vec![
        MemoryRegion::zeroed(RAM_BASE, 0x1000),
        MemoryRegion::zeroed(RAM_BASE + 0x800, 0x1000),
    ];
    assert_eq!(SimHandle::new(regions).err(), Some(SpError::MapInvalid));
}

#[test]
fn empty_region_is_map_invalid() {
    let regions = vec![MemoryRegion::zeroed(RAM_BASE, 0)];
    assert_eq!(SimHandle::new(regions).err(), Some(SpError::MapInvalid));
}

#[test]
fn config_start_pc_is_honoured() {
    let config = Config::from_json(r#"{"general": {"start_pc": 8192}}"#).unwrap();
    let regions = vec![MemoryRegion::zeroed(0x2000, 0x1000)];
    let h = SimHandle::with_config(regions, &config).unwrap();
    assert_eq!(h.simulator().pc(), 0x2000);
}
