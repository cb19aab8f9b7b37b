//! # Instruction Cache Coherence
//!
//! Guest stores do not invalidate cached instructions. `fence.i` and an explicit
//! flush do, and a disabled cache always fetches from memory.

use pretty_assertions::assert_eq;
use spikelib_core::config::Config;

use crate::common::builder::instruction::*;
use crate::common::harness::{RAM_BASE, TestContext};

/// `addi x5, x0, 1`, a store that rewrites it to `addi x5, x0, 2`, then
/// `extra` followed by a jump back to the start.
fn self_modifying(extra: &[u32]) -> Vec<u32> {
    let mut program = vec![addi(5, 0, 1), sw(1, 2, 0)];
    program.extend_from_slice(extra);
    let back = -4 * (program.len() as i32);
    program.push(jal(0, back));
    program
}

fn run_twice(mut tc: TestContext, steps: usize) -> u64 {
    tc.set_reg(1, RAM_BASE);
    tc.set_reg(2, u64::from(addi(5, 0, 2)));
    tc.run(steps);
    tc.get_reg(5)
}

#[test]
fn guest_store_leaves_the_cached_instruction_in_place() {
    let tc = TestContext::new().load_program(RAM_BASE, &self_modifying(&[]));
    assert_eq!(run_twice(tc, 4), 1);
}

#[test]
fn fence_i_makes_the_store_visible() {
    let tc = TestContext::new().load_program(RAM_BASE, &self_modifying(&[fence_i()]));
    assert_eq!(run_twice(tc, 5), 2);
}

#[test]
fn disabled_cache_always_sees_memory() {
    let mut config = Config::default();
    config.icache.enabled = false;
    let tc = TestContext::with_config(&config).load_program(RAM_BASE, &self_modifying(&[]));
    assert_eq!(run_twice(tc, 4), 2);
}

#[test]
fn host_flush_drops_stale_entries() {
    let mut tc = TestContext::new().load_program(RAM_BASE, &[addi(5, 0, 1)]);
    tc.run(1);
    tc.cpu_mut()
        .bus
        .bus
        .load_binary_at(&addi(5, 0, 3).to_le_bytes(), RAM_BASE)
        .unwrap();

    tc.sim.set_pc(RAM_BASE);
    tc.run(1);
    assert_eq!(tc.get_reg(5), 1);

    tc.sim.flush_icache();
    tc.sim.set_pc(RAM_BASE);
    tc.run(1);
    assert_eq!(tc.get_reg(5), 3);
}

#[test]
fn hits_and_misses_are_counted() {
    let program = [addi(1, 1, 1), jal(0, -4)];
    let mut tc = TestContext::new().load_program(RAM_BASE, &program);
    tc.run(6);
    assert_eq!(tc.cpu().icache.misses, 2);
    assert_eq!(tc.cpu().icache.hits, 4);
}
