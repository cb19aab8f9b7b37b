//! Guest memory regions.
//!
//! This module implements the memory side of the system. It provides:
//! 1. **Region descriptions:** [`MemoryRegion`], what the caller asks to be mapped.
//! 2. **Buffer:** [`buffer::RegionBuffer`], the backing storage of one region.
//! 3. **Memory:** The bus device that maps a buffer at its base address.

/// Backing storage (mmap, `Vec`, or borrowed pointer) of a region.
pub mod buffer;

use self::buffer::RegionBuffer;
use crate::common::EngineError;
use crate::soc::traits::Device;

/// Where the bytes of a region come from.
pub enum RegionContent {
    /// Zero-filled storage allocated by the engine.
    Zeroed,
    /// Caller-provided initial contents, moved into the engine.
    Owned(Vec<u8>),
    /// Caller-owned storage used in place.
    Borrowed(*mut u8),
}

/// A contiguous range of guest physical memory requested at construction.
pub struct MemoryRegion {
    base: u64,
    size: u64,
    content: RegionContent,
}

impl MemoryRegion {
    /// Describes a zero-filled region of `size` bytes at `base`.
    pub const fn zeroed(base: u64, size: u64) -> Self {
        Self {
            base,
            size,
            content: RegionContent::Zeroed,
        }
    }

    /// Describes a region at `base` initialised with `data`; its size is `data.len()`.
    pub fn from_vec(base: u64, data: Vec<u8>) -> Self {
        Self {
            base,
            size: data.len() as u64,
            content: RegionContent::Owned(data),
        }
    }

    /// Describes a region backed by caller-owned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and valid for reads and writes of `size` bytes until
    /// the engine built from this region is dropped, and the caller must not access
    /// that memory while the engine is alive.
    pub const unsafe fn borrowed(base: u64, size: u64, ptr: *mut u8) -> Self {
        Self {
            base,
            size,
            content: RegionContent::Borrowed(ptr),
        }
    }

    /// Guest physical base address.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size in bytes.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Allocates or adopts the backing buffer.
    pub(crate) fn into_buffer(self) -> Result<(u64, RegionBuffer), EngineError> {
        let size = usize::try_from(self.size).map_err(|_| EngineError::AllocationFailed {
            size: usize::MAX,
        })?;
        let buffer = match self.content {
            RegionContent::Zeroed => RegionBuffer::zeroed(size)?,
            RegionContent::Owned(data) => RegionBuffer::from_vec(data),
            // SAFETY: upheld by the contract of `MemoryRegion::borrowed`.
            RegionContent::Borrowed(ptr) => unsafe { RegionBuffer::borrowed(ptr, size) },
        };
        Ok((self.base, buffer))
    }
}

/// A memory region attached to the bus.
pub struct Memory {
    buffer: RegionBuffer,
    base_addr: u64,
    name: String,
}

impl Memory {
    /// Maps `buffer` at `base_addr`.
    pub fn new(buffer: RegionBuffer, base_addr: u64) -> Self {
        let kind = if buffer.is_borrowed() { "EXT" } else { "RAM" };
        Self {
            buffer,
            base_addr,
            name: format!("{kind}@{base_addr:#x}"),
        }
    }

    /// Copies `N` bytes starting at `offset`.
    #[inline]
    fn bytes<const N: usize>(&self, offset: u64) -> [u8; N] {
        let start = offset as usize;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer.as_slice()[start..start + N]);
        out
    }

    #[inline]
    fn put(&mut self, offset: u64, data: &[u8]) {
        let start = offset as usize;
        self.buffer.as_mut_slice()[start..start + data.len()].copy_from_slice(data);
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        &self.name
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.buffer.len() as u64)
    }

    fn read_u8(&mut self, offset: u64) -> u8 {
        self.buffer.as_slice()[offset as usize]
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        u16::from_le_bytes(self.bytes(offset))
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        u32::from_le_bytes(self.bytes(offset))
    }

    fn read_u64(&mut self, offset: u64) -> u64 {
        u64::from_le_bytes(self.bytes(offset))
    }

    fn write_u8(&mut self, offset: u64, val: u8) {
        self.buffer.as_mut_slice()[offset as usize] = val;
    }

    fn write_u16(&mut self, offset: u64, val: u16) {
        self.put(offset, &val.to_le_bytes());
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.put(offset, &val.to_le_bytes());
    }

    fn write_u64(&mut self, offset: u64, val: u64) {
        self.put(offset, &val.to_le_bytes());
    }

    fn write_bytes(&mut self, offset: u64, data: &[u8]) {
        self.put(offset, data);
    }
}
