//! # CPU Execution Tests
//!
//! Runs short programs through `Cpu::step` and checks registers, PC and the
//! traps raised by fetch and decode.

use pretty_assertions::assert_eq;
use rstest::rstest;
use spikelib_core::common::Trap;

use crate::common::builder::instruction::*;
use crate::common::harness::{RAM_BASE, TestContext};

// ══════════════════════════════════════════════════════════
// Integer programs
// ══════════════════════════════════════════════════════════

#[test]
fn add_commits_and_advances_pc() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[add(5, 6, 7)]);
    tc.set_reg(6, 0x1111_0000);
    tc.set_reg(7, 0x1111);

    tc.step().unwrap();

    assert_eq!(tc.get_reg(5), 0x1111_1111);
    assert_eq!(tc.pc(), RAM_BASE + 4);
}

#[test]
fn writes_to_x0_are_discarded() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[addi(0, 0, 5)]);
    tc.run(1);
    assert_eq!(tc.get_reg(0), 0);
}

#[test]
fn lui_sign_extends_and_auipc_is_pc_relative() {
    let program = [lui(1, 0x1234_5000), lui(2, 0x8000_0000_u32 as i32), auipc(3, 0x1000)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.run(3);

    assert_eq!(tc.get_reg(1), 0x1234_5000);
    assert_eq!(tc.get_reg(2), 0xFFFF_FFFF_8000_0000);
    assert_eq!(tc.get_reg(3), RAM_BASE + 8 + 0x1000);
}

#[test]
fn jal_links_and_jumps() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[jal(1, 8)]);
    tc.run(1);
    assert_eq!(tc.pc(), RAM_BASE + 8);
    assert_eq!(tc.get_reg(1), RAM_BASE + 4);
}

#[test]
fn jalr_clears_the_low_target_bit() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[jalr(1, 5, 0)]);
    tc.set_reg(5, RAM_BASE + 0x11);
    tc.run(1);
    assert_eq!(tc.pc(), RAM_BASE + 0x10);
    assert_eq!(tc.get_reg(1), RAM_BASE + 4);
}

#[test]
fn countdown_loop_terminates() {
    let program = [addi(1, 0, 3), addi(1, 1, -1), bne(1, 0, -4)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.run(7);
    assert_eq!(tc.get_reg(1), 0);
    assert_eq!(tc.pc(), RAM_BASE + 12);
}

#[test]
fn signed_branch_compares_as_signed() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[blt(1, 2, 16)]);
    tc.set_reg(1, (-1_i64) as u64);
    tc.set_reg(2, 1);
    tc.run(1);
    assert_eq!(tc.pc(), RAM_BASE + 16);
}

#[rstest]
#[case::addiw_wraps(addiw(3, 1, 1), 0x7FFF_FFFF, 0, 0xFFFF_FFFF_8000_0000)]
#[case::addw_truncates(addw(3, 1, 2), 0x1_0000_0001, 1, 2)]
#[case::srai_keeps_sign((srai(3, 1, 2)), (-16_i64) as u64, 0, (-4_i64) as u64)]
#[case::slli_uses_six_bits(slli(3, 1, 40), 1, 0, 1 << 40)]
#[case::sub(sub(3, 1, 2), 5, 7, (-2_i64) as u64)]
#[case::mul(mul(3, 1, 2), 6, 7, 42)]
#[case::mulh_negative(mulh(3, 1, 2), u64::MAX, 2, u64::MAX)]
#[case::divw_by_zero(divw(3, 1, 2), 10, 0, u64::MAX)]
fn alu_results(#[case] inst: u32, #[case] x1: u64, #[case] x2: u64, #[case] expected: u64) {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[inst]);
    tc.set_reg(1, x1);
    tc.set_reg(2, x2);
    tc.run(1);
    assert_eq!(tc.get_reg(3), expected);
}

#[test]
fn compressed_loop_runs_through_expansion() {
    // add x5, x6, x7; c.addi x6, 1; c.j -6
    let code = [0xb3, 0x02, 0x73, 0x00, 0x05, 0x03, 0xed, 0xbf];
    let mut tc = TestContext::new().load_bytes(RAM_BASE, &code);
    tc.set_reg(6, 1);
    tc.set_reg(7, 1);

    tc.run(6);

    assert_eq!(tc.get_reg(5), 3);
    assert_eq!(tc.get_reg(6), 3);
    assert_eq!(tc.pc(), RAM_BASE);
}

// ══════════════════════════════════════════════════════════
// Fetch and decode traps
// ══════════════════════════════════════════════════════════

#[test]
fn odd_pc_is_a_misaligned_fetch() {
    let mut tc = TestContext::new();
    tc.sim.set_pc(RAM_BASE + 1);

    assert_eq!(tc.step(), Err(Trap::InstructionAddressMisaligned(RAM_BASE + 1)));
    assert_eq!(tc.sim.mcause(), 0);
    assert_eq!(tc.pc(), tc.sim.mtvec());
}

#[test]
fn unmapped_pc_is_a_fetch_access_fault() {
    let mut tc = TestContext::new();
    tc.sim.set_pc(0x8000);
    assert_eq!(tc.step(), Err(Trap::InstructionAccessFault(0x8000)));
    assert_eq!(tc.sim.mcause(), 1);
}

#[test]
fn instruction_straddling_the_region_end_faults_on_the_upper_half() {
    let end = RAM_BASE + 0x1000;
    let mut tc = TestContext::new().load_bytes(end - 2, &[0xb3, 0x02]);
    assert_eq!(tc.step(), Err(Trap::InstructionAccessFault(end)));
}

#[test]
fn zero_parcel_is_illegal() {
    let mut tc = TestContext::new();
    assert_eq!(tc.step(), Err(Trap::IllegalInstruction(0)));
    assert_eq!(tc.sim.mcause(), 2);
    assert_eq!(tc.cpu().csrs.mepc, RAM_BASE);
}

#[test]
fn reserved_opcode_is_illegal() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[0xFFFF_FFFF]);
    assert_eq!(tc.step(), Err(Trap::IllegalInstruction(0xFFFF_FFFF)));
    assert_eq!(tc.cpu().csrs.mtval, 0xFFFF_FFFF);
}

#[test]
fn disabled_m_extension_rejects_mul() {
    let mut tc = TestContext::with_isa("rv64i").load_program(RAM_BASE, &[mul(3, 1, 2)]);
    assert_eq!(tc.step(), Err(Trap::IllegalInstruction(mul(3, 1, 2))));
}

#[test]
fn mulh_has_no_word_form() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[mulhw(3, 1, 2)]);
    assert!(matches!(tc.step(), Err(Trap::IllegalInstruction(_))));
}

#[test]
fn without_c_a_compressed_parcel_is_illegal() {
    let mut tc = TestContext::with_isa("rv64imafd").load_bytes(RAM_BASE, &[0x05, 0x05]);
    assert_eq!(tc.step(), Err(Trap::IllegalInstruction(0x0505)));
}

#[test]
fn without_c_jumps_must_be_word_aligned() {
    let mut tc = TestContext::with_isa("rv64imafd").load_program(RAM_BASE, &[jal(0, 2)]);
    assert_eq!(tc.step(), Err(Trap::InstructionAddressMisaligned(RAM_BASE + 2)));
    assert_eq!(tc.cpu().csrs.mepc, RAM_BASE);
}

#[test]
fn counters_advance_on_every_step() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[addi(1, 0, 1)]);
    tc.run(1);
    let _ = tc.step(); // zero parcel traps
    assert_eq!(tc.sim.instret(), 2);
    assert_eq!(tc.cpu().csrs.mcycle, 2);
}
