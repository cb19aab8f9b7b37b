//! System interconnect (bus).
//!
//! Routes physical accesses to the device whose region contains them. Devices
//! are kept sorted by base address and never overlap. An access is either fully
//! inside one device or unclaimed; unclaimed accesses return `None` so the hart
//! can raise the matching access fault.

use super::traits::Device;

/// System bus routing accesses by physical address.
#[derive(Default)]
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
}

impl Bus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device; devices are kept sorted by base address.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Returns the number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if one device contains all of `[paddr, paddr + len)`.
    pub fn contains(&self, paddr: u64, len: u64) -> bool {
        self.devices.iter().any(|d| within(d.address_range(), paddr, len))
    }

    /// Returns `true` if every byte of `[paddr, paddr + len)` is backed by some device.
    ///
    /// Unlike [`Bus::contains`], the range may span adjacent devices.
    pub fn is_mapped(&self, paddr: u64, len: u64) -> bool {
        let Some(end) = paddr.checked_add(len) else {
            return false;
        };
        let mut cursor = paddr;
        while cursor < end {
            let next = self
                .devices
                .iter()
                .map(|d| d.address_range())
                .find(|&range| within(range, cursor, 1))
                .map(|(base, size)| base + size);
            match next {
                Some(region_end) => cursor = region_end,
                None => return false,
            }
        }
        true
    }

    fn find_device(&mut self, paddr: u64, len: u64) -> Option<(&mut Box<dyn Device>, u64)> {
        let hinted = self
            .devices
            .get(self.last_device_idx)
            .is_some_and(|d| within(d.address_range(), paddr, len));
        let idx = if hinted {
            self.last_device_idx
        } else {
            let idx = self
                .devices
                .iter()
                .position(|d| within(d.address_range(), paddr, len))?;
            self.last_device_idx = idx;
            idx
        };
        let dev = &mut self.devices[idx];
        let offset = paddr - dev.address_range().0;
        Some((dev, offset))
    }

    /// Reads one byte; `None` if no device claims the address.
    pub fn read_u8(&mut self, paddr: u64) -> Option<u8> {
        self.find_device(paddr, 1).map(|(dev, off)| dev.read_u8(off))
    }

    /// Reads two bytes (little-endian); `None` unless one device holds both.
    pub fn read_u16(&mut self, paddr: u64) -> Option<u16> {
        self.find_device(paddr, 2).map(|(dev, off)| dev.read_u16(off))
    }

    /// Reads four bytes (little-endian); `None` unless one device holds all of them.
    pub fn read_u32(&mut self, paddr: u64) -> Option<u32> {
        self.find_device(paddr, 4).map(|(dev, off)| dev.read_u32(off))
    }

    /// Reads eight bytes (little-endian); `None` unless one device holds all of them.
    pub fn read_u64(&mut self, paddr: u64) -> Option<u64> {
        self.find_device(paddr, 8).map(|(dev, off)| dev.read_u64(off))
    }

    /// Writes one byte; `None` if no device claims the address.
    pub fn write_u8(&mut self, paddr: u64, val: u8) -> Option<()> {
        self.find_device(paddr, 1).map(|(dev, off)| dev.write_u8(off, val))
    }

    /// Writes two bytes (little-endian).
    pub fn write_u16(&mut self, paddr: u64, val: u16) -> Option<()> {
        self.find_device(paddr, 2).map(|(dev, off)| dev.write_u16(off, val))
    }

    /// Writes four bytes (little-endian).
    pub fn write_u32(&mut self, paddr: u64, val: u32) -> Option<()> {
        self.find_device(paddr, 4).map(|(dev, off)| dev.write_u32(off, val))
    }

    /// Writes eight bytes (little-endian).
    pub fn write_u64(&mut self, paddr: u64, val: u64) -> Option<()> {
        self.find_device(paddr, 8).map(|(dev, off)| dev.write_u64(off, val))
    }

    /// Copies a binary blob into one device.
    ///
    /// Returns `None` and writes nothing unless a single device holds the whole blob.
    pub fn load_binary_at(&mut self, data: &[u8], paddr: u64) -> Option<()> {
        self.find_device(paddr, data.len() as u64)
            .map(|(dev, off)| dev.write_bytes(off, data))
    }
}

/// Returns `true` if `[paddr, paddr + len)` lies inside `(base, size)`.
#[inline]
fn within((base, size): (u64, u64), paddr: u64, len: u64) -> bool {
    paddr >= base
        && paddr
            .checked_add(len)
            .is_some_and(|end| end <= base.saturating_add(size))
}
