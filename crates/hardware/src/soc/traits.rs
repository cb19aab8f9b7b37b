//! What the bus needs from a mapped region.
//!
//! The bus range-checks every access before forwarding it, so implementors see
//! only offsets where the whole access fits.

/// A bus-attached address range.
pub trait Device: Send {
    /// Label used in logs, e.g. `"RAM@0x1000"`.
    fn name(&self) -> &str;
    /// `(base, size)` in guest physical addresses.
    fn address_range(&self) -> (u64, u64);
    /// Byte at `offset`.
    fn read_u8(&mut self, offset: u64) -> u8;
    /// Little-endian halfword at `offset`.
    fn read_u16(&mut self, offset: u64) -> u16;
    /// Little-endian word at `offset`.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Little-endian doubleword at `offset`.
    fn read_u64(&mut self, offset: u64) -> u64;
    /// Stores a byte at `offset`.
    fn write_u8(&mut self, offset: u64, val: u8);
    /// Stores a little-endian halfword at `offset`.
    fn write_u16(&mut self, offset: u64, val: u16);
    /// Stores a little-endian word at `offset`.
    fn write_u32(&mut self, offset: u64, val: u32);
    /// Stores a little-endian doubleword at `offset`.
    fn write_u64(&mut self, offset: u64, val: u64);

    /// Copies `data` to consecutive offsets, one `write_u8` at a time unless
    /// overridden. Host program loading goes through here.
    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        for (addr, &byte) in (offset..).zip(data) {
            self.write_u8(addr, byte);
        }
    }
}
