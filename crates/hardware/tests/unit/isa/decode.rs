//! # Decoder Tests

use pretty_assertions::assert_eq;
use spikelib_core::isa::decode::{decode, sign_extend};
use spikelib_core::isa::opcodes;

use crate::common::builder::instruction::*;

#[test]
fn r_type_fields() {
    let d = decode(sub(5, 6, 7));
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!((d.rd, d.rs1, d.rs2), (5, 6, 7));
    assert_eq!(d.funct7, 0b010_0000);
    assert_eq!(d.imm, 0);
}

#[test]
fn store_and_branch_immediates_reassemble() {
    assert_eq!(decode(sd(2, 5, -8)).imm, -8);
    assert_eq!(decode(sw(2, 5, 2047)).imm, 2047);
    assert_eq!(decode(beq(1, 2, -4096)).imm, -4096);
    assert_eq!(decode(bne(1, 2, 4094)).imm, 4094);
}

#[test]
fn jump_immediate_covers_its_full_range() {
    assert_eq!(decode(jal(0, -(1 << 20))).imm, -(1 << 20));
    assert_eq!(decode(jal(1, (1 << 20) - 2)).imm, (1 << 20) - 2);
}

#[test]
fn fma_carries_a_third_source() {
    let d = decode(fmadd_d(4, 1, 2, 3));
    assert_eq!(d.rs3, 3);
    assert_eq!(d.opcode, opcodes::OP_FMADD);
}

#[test]
fn sign_extend_uses_the_top_bit() {
    assert_eq!(sign_extend(0x800, 12), -2048);
    assert_eq!(sign_extend(0x7FF, 12), 2047);
    assert_eq!(sign_extend(0xFFFF_FFFF, 32), -1);
}

mod properties {
    use proptest::prelude::*;
    use spikelib_core::isa::decode::decode;

    use crate::common::builder::instruction::*;

    proptest! {
        #[test]
        fn i_type_immediate_survives_encoding(imm in -2048_i32..2048) {
            prop_assert_eq!(decode(addi(1, 2, imm)).imm, i64::from(imm));
        }

        #[test]
        fn branch_offset_survives_encoding(half in -2048_i32..2048) {
            let offset = half * 2;
            prop_assert_eq!(decode(blt(3, 4, offset)).imm, i64::from(offset));
        }
    }
}
