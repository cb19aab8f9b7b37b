//! # Compressed Expansion Tests
//!
//! Each parcel must expand to exactly the encoding of the instruction it
//! abbreviates. Reserved parcels expand to zero.

use pretty_assertions::assert_eq;
use rstest::rstest;
use spikelib_core::isa::opcodes;
use spikelib_core::isa::rvc::expand;

use crate::common::builder::instruction::*;

#[rstest]
#[case::c_addi(0x0505, addi(10, 10, 1))]
#[case::c_li(0x52FD, addi(5, 0, -1))]
#[case::c_nop(0x0001, addi(0, 0, 0))]
#[case::c_slli(0x03B6, slli(7, 7, 13))]
#[case::c_srai(0x8505, srai(10, 10, 1))]
#[case::c_j(0xBFED, jal(0, -6))]
#[case::c_mv(0x852E, add(10, 0, 11))]
#[case::c_add(0x952E, add(10, 10, 11))]
#[case::c_jr(0x8082, jalr(0, 1, 0))]
#[case::c_ebreak(0x9002, opcodes::EBREAK)]
fn expands_to_the_base_encoding(#[case] parcel: u16, #[case] expected: u32) {
    assert_eq!(expand(parcel), expected);
}

#[rstest]
#[case::all_zero(0x0000)]
#[case::addi4spn_zero_immediate(0x0004)]
#[case::lwsp_x0(0x4002)]
#[case::jr_x0(0x8002)]
fn reserved_parcels_expand_to_zero(#[case] parcel: u16) {
    assert_eq!(expand(parcel), 0);
}

mod properties {
    use proptest::prelude::*;
    use spikelib_core::isa::rvc::expand;

    proptest! {
        #[test]
        fn expansion_is_zero_or_a_full_width_encoding(parcel in any::<u16>()) {
            let inst = expand(parcel);
            prop_assert!(inst == 0 || inst & 0b11 == 0b11);
        }
    }
}
