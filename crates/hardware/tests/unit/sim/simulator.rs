//! # Simulator Host Interface Tests

use pretty_assertions::assert_eq;
use spikelib_core::common::Trap;
use spikelib_core::config::Config;
use spikelib_core::core::arch::csr::{MISA, MSTATUS_FS, MSTATUS_FS_DIRTY};
use spikelib_core::{EngineError, MemoryRegion, Simulator};

use crate::common::builder::instruction::*;
use crate::common::harness::{RAM_BASE, TestContext};

#[test]
fn new_hart_starts_at_the_configured_pc() {
    let mut config = Config::default();
    config.general.start_pc = 0x2000;
    let sim = Simulator::new(vec![MemoryRegion::zeroed(0x2000, 0x100)], &config).unwrap();
    assert_eq!(sim.pc(), 0x2000);
    assert_eq!(sim.instret(), 0);
    assert_eq!(sim.mcause(), 0);
}

#[test]
fn bad_isa_is_reported() {
    let config = Config::with_isa("rv32i");
    let result = Simulator::new(vec![MemoryRegion::zeroed(0x1000, 0x100)], &config);
    assert!(matches!(result, Err(EngineError::UnsupportedIsa(isa)) if isa == "rv32i"));
}

#[test]
fn bad_region_is_reported_before_the_isa() {
    let config = Config::with_isa("rv32i");
    let result = Simulator::new(vec![MemoryRegion::zeroed(0x1000, 0)], &config);
    assert!(matches!(result, Err(EngineError::EmptyRegion { base: 0x1000 })));
}

#[test]
fn host_load_and_store_check_alignment_and_mapping() {
    let mut tc = TestContext::new();
    assert_eq!(tc.sim.store(RAM_BASE + 8, 8, 0x0102_0304_0506_0708), Ok(()));
    assert_eq!(tc.sim.load(RAM_BASE + 8, 1), Ok(0x08));
    assert_eq!(tc.sim.load(RAM_BASE + 8, 4), Ok(0x0506_0708));
    assert_eq!(tc.sim.load(RAM_BASE + 9, 2), Err(Trap::LoadAddressMisaligned(RAM_BASE + 9)));
    assert_eq!(tc.sim.store(0x100, 8, 0), Err(Trap::StoreAccessFault(0x100)));
}

#[test]
fn host_accessors_do_not_take_traps() {
    let mut tc = TestContext::new();
    let _ = tc.sim.load(0x100, 8);
    assert_eq!(tc.sim.mcause(), 0);
    assert_eq!(tc.pc(), RAM_BASE);
}

#[test]
fn writing_an_f_register_dirties_fp_state() {
    let mut tc = TestContext::new();
    tc.sim.write_f(3, 1.0_f64.to_bits());
    assert_eq!(tc.sim.read_f(3), 1.0_f64.to_bits());
    assert_eq!(tc.cpu().csrs.mstatus & MSTATUS_FS, MSTATUS_FS_DIRTY);
}

#[test]
fn x0_stays_zero_through_the_host_interface() {
    let mut tc = TestContext::new();
    tc.sim.write_x(0, 5);
    assert_eq!(tc.sim.read_x(0), 0);
}

#[test]
fn read_csr_mirrors_csrr() {
    let tc = TestContext::with_isa("rv64imac");
    let misa = tc.sim.read_csr(MISA).unwrap();
    assert_eq!(misa & (1 << 5), 0, "no F");
    assert_eq!(tc.sim.read_csr(0x7C0), None);
}

#[test]
fn is_mapped_spans_whole_ranges() {
    let tc = TestContext::new();
    assert!(tc.sim.is_mapped(RAM_BASE, 0x1000));
    assert!(!tc.sim.is_mapped(RAM_BASE, 0x1001));
}

#[test]
fn step_reports_the_trap_and_vectors() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[ecall()]);
    assert_eq!(tc.sim.step(), Err(Trap::EnvironmentCallFromMMode));
    assert_eq!(tc.sim.pc(), tc.sim.mtvec());
    assert_eq!(tc.sim.instret(), 1);
}
