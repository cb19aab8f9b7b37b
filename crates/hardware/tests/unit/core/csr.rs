//! # Zicsr Tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use spikelib_core::common::Trap;
use spikelib_core::core::arch::csr::{
    CYCLE, FCSR, FFLAGS, FRM, MHARTID, MISA, MISA_EXT_A, MISA_EXT_C, MISA_EXT_D, MISA_EXT_F,
    MISA_EXT_I, MISA_EXT_M, MISA_XLEN_64, MSCRATCH, MSTATUS, MSTATUS_FS, MSTATUS_FS_DIRTY,
    MSTATUS_SD,
};

use crate::common::builder::instruction::*;
use crate::common::harness::{RAM_BASE, TestContext};

#[test]
fn misa_reflects_the_default_extensions() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[csrrs(1, MISA, 0)]);
    tc.run(1);
    let expected = MISA_XLEN_64
        | MISA_EXT_I
        | MISA_EXT_M
        | MISA_EXT_A
        | MISA_EXT_F
        | MISA_EXT_D
        | MISA_EXT_C;
    assert_eq!(tc.get_reg(1), expected);
}

#[test]
fn csrrw_swaps_old_and_new_values() {
    let program = [csrrw(0, MSCRATCH, 1), csrrwi(2, MSCRATCH, 7)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.set_reg(1, 0xABCD);
    tc.run(2);
    assert_eq!(tc.get_reg(2), 0xABCD);
    assert_eq!(tc.sim.read_csr(MSCRATCH), Some(7));
}

#[test]
fn csrr_on_a_read_only_counter_is_legal() {
    let program = [addi(0, 0, 0), csrrs(1, CYCLE, 0)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.run(2);
    assert_eq!(tc.get_reg(1), 1);
}

#[rstest]
#[case::write_to_cycle(csrrw(1, CYCLE, 2))]
#[case::set_bits_of_mhartid(csrrs(1, MHARTID, 2))]
#[case::unknown_address(csrrs(1, 0x7C0, 0))]
fn refused_csr_accesses_are_illegal(#[case] inst: u32) {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[inst]);
    tc.set_reg(1, 0x55);
    tc.set_reg(2, 1);

    assert_eq!(tc.step(), Err(Trap::IllegalInstruction(inst)));
    assert_eq!(tc.get_reg(1), 0x55, "rd must not be written");
}

#[test]
fn fp_csrs_are_absent_without_f() {
    let mut tc = TestContext::with_isa("rv64imac").load_program(RAM_BASE, &[csrrs(1, FCSR, 0)]);
    assert!(matches!(tc.step(), Err(Trap::IllegalInstruction(_))));
}

#[test]
fn fcsr_combines_frm_and_fflags() {
    let program = [csrrwi(0, FRM, 0b010), csrrwi(0, FFLAGS, 0b1_0001), csrrs(1, FCSR, 0)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.run(3);
    assert_eq!(tc.get_reg(1), (0b010 << 5) | 0b1_0001);
}

#[test]
fn writing_fflags_dirties_fp_state() {
    let program = [csrrwi(0, FFLAGS, 1), csrrs(1, MSTATUS, 0)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.run(2);
    assert_eq!(tc.get_reg(1) & MSTATUS_FS, MSTATUS_FS_DIRTY);
    assert_eq!(tc.get_reg(1) & MSTATUS_SD, MSTATUS_SD);
}
