//! # Bus Routing Tests
//!
//! Uses `mockall` devices to check which device an access reaches and at which
//! offset, and that unclaimed accesses never touch a device.

use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use spikelib_core::soc::interconnect::Bus;

use crate::common::mocks::bus::device_at;

#[test]
fn access_is_forwarded_with_a_device_relative_offset() {
    let mut low = device_at(0x1000, 0x100);
    let _ = low
        .expect_read_u32()
        .with(eq(0x10))
        .times(1)
        .return_const(0xDEAD_BEEF_u32);
    let mut high = device_at(0x2000, 0x100);
    let _ = high
        .expect_write_u64()
        .with(eq(0x8), eq(42))
        .times(1)
        .return_const(());

    let mut bus = Bus::new();
    bus.add_device(Box::new(high));
    bus.add_device(Box::new(low));

    assert_eq!(bus.read_u32(0x1010), Some(0xDEAD_BEEF));
    assert_eq!(bus.write_u64(0x2008, 42), Some(()));
    assert_eq!(bus.device_count(), 2);
}

#[test]
fn straddling_access_is_unclaimed() {
    let mut dev = device_at(0x1000, 0x100);
    let _ = dev.expect_read_u32().never();
    let _ = dev.expect_write_u16().never();

    let mut bus = Bus::new();
    bus.add_device(Box::new(dev));

    assert_eq!(bus.read_u32(0x10FE), None);
    assert_eq!(bus.write_u16(0x10FF, 1), None);
}

#[test]
fn access_outside_every_device_is_unclaimed() {
    let mut dev = device_at(0x1000, 0x100);
    let _ = dev.expect_read_u8().never();

    let mut bus = Bus::new();
    bus.add_device(Box::new(dev));

    assert_eq!(bus.read_u8(0xFFF), None);
    assert_eq!(bus.read_u8(0x1100), None);
    assert_eq!(bus.read_u64(u64::MAX - 3), None);
}

#[test]
fn mapping_may_span_adjacent_devices_but_containment_may_not() {
    let mut bus = Bus::new();
    bus.add_device(Box::new(device_at(0x1000, 0x100)));
    bus.add_device(Box::new(device_at(0x1100, 0x100)));
    bus.add_device(Box::new(device_at(0x3000, 0x100)));

    assert!(bus.is_mapped(0x10F0, 0x20));
    assert!(!bus.contains(0x10F0, 0x20));
    assert!(bus.contains(0x1100, 0x100));
    assert!(!bus.is_mapped(0x11F0, 0x20));
    assert!(!bus.is_mapped(u64::MAX, 2));
    assert!(bus.is_mapped(0x3000, 0));
}

#[test]
fn binary_load_needs_a_single_device() {
    let mut dev = device_at(0x1000, 0x10);
    let _ = dev
        .expect_write_u8()
        .times(4)
        .return_const(());

    let mut bus = Bus::new();
    bus.add_device(Box::new(dev));

    assert_eq!(bus.load_binary_at(&[1, 2, 3, 4], 0x100C), Some(()));
    assert_eq!(bus.load_binary_at(&[1, 2, 3, 4], 0x100D), None);
}
