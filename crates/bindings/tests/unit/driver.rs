use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use spikelib::{RegId, RegValue, SimHandle, SpError, StopReason};

use crate::common::encode::*;
use crate::common::harness::{RAM_BASE, UNMAPPED, handle, handle_with_vector, load};

const NEVER: u64 = 0x2000;

fn run(h: &mut SimHandle, begin: u64, end: u64) -> spikelib::RunReport {
    h.spike_start(begin, end, Duration::ZERO, 0)
}

fn x(h: &SimHandle, n: u8) -> u64 {
    h.read_register_bits(RegId::x(n).unwrap())
}

#[test]
fn straight_line_code_stops_at_the_end_address() {
    let mut h = handle();
    load(
        &mut h,
        RAM_BASE,
        &[addi(1, 0, 5), addi(2, 0, 7), add(3, 1, 2), add(4, 1, 2)],
    );

    let report = run(&mut h, RAM_BASE, RAM_BASE + 12);

    assert_eq!(report.reason, StopReason::ReachedEnd);
    assert_eq!(report.instructions, 3);
    assert_eq!(x(&h, 3), 12);
    assert_eq!(x(&h, 4), 0);
    assert_eq!(h.read_register_bits(RegId::PC), RAM_BASE + 12);
    assert!(report.into_result().is_ok());
}

#[test]
fn begin_equal_to_end_executes_nothing() {
    let mut h = handle();
    load(&mut h, RAM_BASE, &[addi(1, 0, 5)]);

    let report = run(&mut h, RAM_BASE, RAM_BASE);

    assert_eq!(report.reason, StopReason::ReachedEnd);
    assert_eq!(report.instructions, 0);
    assert_eq!(x(&h, 1), 0);
}

#[test]
fn cap_stops_after_exactly_that_many_steps() {
    let mut h = handle();
    // loop: x5 += 1; j loop
    load(&mut h, RAM_BASE, &[addi(5, 5, 1), jal(0, -4)]);

    let report = h.spike_start(RAM_BASE, NEVER, Duration::ZERO, 7);

    assert_eq!(report.reason, StopReason::MaxCountReached);
    assert_eq!(report.into_result(), Err(SpError::MaxCountReached));
    assert_eq!(report.instructions, 7);
    assert_eq!(x(&h, 5), 4);
    assert_eq!(h.read_register_bits(RegId::PC), RAM_BASE + 4);
}

#[test]
fn end_address_wins_over_a_cap_hit_on_the_same_step() {
    let mut h = handle();
    load(&mut h, RAM_BASE, &[addi(1, 0, 1), addi(2, 0, 2)]);

    let report = h.spike_start(RAM_BASE, RAM_BASE + 8, Duration::ZERO, 2);

    assert_eq!(report.reason, StopReason::ReachedEnd);
    assert_eq!(report.instructions, 2);
}

#[test]
fn tight_loop_times_out() {
    let mut h = handle();
    load(&mut h, RAM_BASE, &[jal(0, 0)]);

    let report = h.spike_start(RAM_BASE, NEVER, Duration::from_millis(50), 0);

    assert_eq!(report.reason, StopReason::Timeout);
    assert!(report.elapsed >= Duration::from_millis(50));
    assert!(report.instructions > 0);
    assert_eq!(h.read_register_bits(RegId::PC), RAM_BASE);
}

#[rstest]
#[case::load_unmapped(&[ld(1, 10, 0)], UNMAPPED, RAM_BASE, SpError::ReadUnmapped)]
#[case::load_misaligned(&[ld(1, 10, 1)], RAM_BASE + 0x800, RAM_BASE, SpError::ReadMisaligned)]
#[case::store_unmapped(&[sd(10, 0, 0)], UNMAPPED, RAM_BASE, SpError::WriteUnmapped)]
#[case::store_misaligned(&[sw(10, 0, 2)], RAM_BASE + 0x800, RAM_BASE, SpError::WriteMisaligned)]
#[case::fetch_misaligned(&[], 0, RAM_BASE + 1, SpError::FetchMisaligned)]
#[case::fetch_unmapped(&[], 0, UNMAPPED, SpError::FetchUnmapped)]
#[case::zero_parcel(&[], 0, RAM_BASE + 0x400, SpError::InstructionInvalid)]
fn faults_stop_the_run_with_their_class(
    #[case] program: &[u32],
    #[case] x10: u64,
    #[case] begin: u64,
    #[case] expected: SpError,
) {
    let mut h = handle();
    load(&mut h, RAM_BASE, program);
    h.write_register(RegId::x(10).unwrap(), RegValue::U64(x10));

    let report = run(&mut h, begin, NEVER);

    assert_eq!(report.reason, StopReason::Fault(expected));
    assert_eq!(report.instructions, 1);
    assert_eq!(h.fault_cause(), expected);
}

#[test]
fn fault_vectoring_onto_the_end_address_reaches_it() {
    let handler = RAM_BASE + 0x100;
    let mut h = handle_with_vector(handler);
    load(&mut h, RAM_BASE, &[ld(1, 10, 0)]);
    h.write_register(RegId::x(10).unwrap(), RegValue::U64(UNMAPPED));

    let report = run(&mut h, RAM_BASE, handler);

    assert_eq!(report.reason, StopReason::ReachedEnd);
    assert_eq!(report.instructions, 1);
    assert!(report.into_result().is_ok());
    assert_eq!(h.fault_cause(), SpError::ReadUnmapped);
}

#[rstest]
#[case::ecall(ecall())]
#[case::ebreak(ebreak())]
fn environment_traps_are_not_faults(#[case] trap: u32) {
    let handler = RAM_BASE + 0x100;
    let mut h = handle_with_vector(handler);
    load(&mut h, RAM_BASE, &[trap]);
    load(&mut h, handler, &[addi(6, 0, 7)]);

    let report = run(&mut h, RAM_BASE, handler + 4);

    assert_eq!(report.reason, StopReason::ReachedEnd);
    assert_eq!(report.instructions, 2);
    assert_eq!(x(&h, 6), 7);
    assert_eq!(h.fault_cause(), SpError::Ok);
}

#[test]
fn host_writes_to_code_are_seen_by_the_next_run() {
    let mut h = handle();
    load(&mut h, RAM_BASE, &[addi(5, 0, 1)]);
    assert_eq!(run(&mut h, RAM_BASE, RAM_BASE + 4).reason, StopReason::ReachedEnd);
    assert_eq!(x(&h, 5), 1);

    load(&mut h, RAM_BASE, &[addi(5, 0, 2)]);
    assert_eq!(run(&mut h, RAM_BASE, RAM_BASE + 4).reason, StopReason::ReachedEnd);
    assert_eq!(x(&h, 5), 2);
}
