//! Memory access façade.
//!
//! Every host access must start on an 8-byte boundary. Accesses of 1, 2, 4 or
//! 8 bytes are a single native load or store; any other length is split into
//! single bytes after checking that the whole range is mapped, so a rejected
//! access never moves a byte. Successful writes flush the instruction cache.

use crate::error::SpError;
use crate::system::SimHandle;

/// Alignment required of every façade address.
pub const ACCESS_ALIGN: u64 = 8;

/// Width of a typed access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    /// 1 byte.
    Byte,
    /// 2 bytes.
    Half,
    /// 4 bytes.
    Word,
    /// 8 bytes.
    Double,
}

impl Width {
    /// Size in bytes.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

/// A typed memory value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemValue {
    /// One byte.
    U8(u8),
    /// Two bytes, little-endian in memory.
    U16(u16),
    /// Four bytes, little-endian in memory.
    U32(u32),
    /// Eight bytes, little-endian in memory.
    U64(u64),
}

impl MemValue {
    /// Width of the value.
    pub const fn width(self) -> Width {
        match self {
            Self::U8(_) => Width::Byte,
            Self::U16(_) => Width::Half,
            Self::U32(_) => Width::Word,
            Self::U64(_) => Width::Double,
        }
    }

    /// The value zero-extended to 64 bits.
    pub const fn widen(self) -> u64 {
        match self {
            Self::U8(v) => v as u64,
            Self::U16(v) => v as u64,
            Self::U32(v) => v as u64,
            Self::U64(v) => v,
        }
    }

    fn narrow(width: Width, raw: u64) -> Self {
        match width {
            Width::Byte => Self::U8(raw as u8),
            Width::Half => Self::U16(raw as u16),
            Width::Word => Self::U32(raw as u32),
            Width::Double => Self::U64(raw),
        }
    }
}

/// Native width for a length, if there is one.
const fn native(len: usize) -> Option<u64> {
    match len {
        1 | 2 | 4 | 8 => Some(len as u64),
        _ => None,
    }
}

impl SimHandle {
    /// Fills `buf` from guest memory at `addr`.
    ///
    /// # Errors
    ///
    /// * [`SpError::ReadMisaligned`] unless `addr` is 8-byte aligned.
    /// * [`SpError::ReadUnmapped`] if any byte is outside every region.
    ///
    /// `buf` is untouched on error.
    pub fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), SpError> {
        if addr % ACCESS_ALIGN != 0 {
            return Err(SpError::ReadMisaligned);
        }
        let sim = self.simulator_mut();
        if let Some(size) = native(buf.len()) {
            let value = sim.load(addr, size).map_err(|_| SpError::ReadUnmapped)?;
            buf.copy_from_slice(&value.to_le_bytes()[..buf.len()]);
            return Ok(());
        }

        if !sim.is_mapped(addr, buf.len() as u64) {
            return Err(SpError::ReadUnmapped);
        }
        for (offset, byte) in (0..).zip(buf.iter_mut()) {
            *byte = sim
                .load(addr + offset, 1)
                .map_err(|_| SpError::ReadUnmapped)? as u8;
        }
        Ok(())
    }

    /// Copies `data` into guest memory at `addr` and flushes the icache.
    ///
    /// # Errors
    ///
    /// * [`SpError::WriteMisaligned`] unless `addr` is 8-byte aligned.
    /// * [`SpError::WriteUnmapped`] if any byte is outside every region.
    ///
    /// Guest memory is untouched on error.
    pub fn write_memory(&mut self, addr: u64, data: &[u8]) -> Result<(), SpError> {
        if addr % ACCESS_ALIGN != 0 {
            return Err(SpError::WriteMisaligned);
        }
        let sim = self.simulator_mut();
        if let Some(size) = native(data.len()) {
            let mut raw = [0u8; 8];
            raw[..data.len()].copy_from_slice(data);
            sim.store(addr, size, u64::from_le_bytes(raw))
                .map_err(|_| SpError::WriteUnmapped)?;
        } else {
            if !sim.is_mapped(addr, data.len() as u64) {
                return Err(SpError::WriteUnmapped);
            }
            for (offset, &byte) in (0..).zip(data) {
                sim.store(addr + offset, 1, u64::from(byte))
                    .map_err(|_| SpError::WriteUnmapped)?;
            }
        }
        sim.flush_icache();
        Ok(())
    }

    /// Reads one typed value.
    ///
    /// # Errors
    ///
    /// As [`SimHandle::read_memory`].
    pub fn read_value(&mut self, addr: u64, width: Width) -> Result<MemValue, SpError> {
        let mut raw = [0u8; 8];
        let len = width.bytes() as usize;
        self.read_memory(addr, &mut raw[..len])?;
        Ok(MemValue::narrow(width, u64::from_le_bytes(raw)))
    }

    /// Writes one typed value.
    ///
    /// # Errors
    ///
    /// As [`SimHandle::write_memory`].
    pub fn write_value(&mut self, addr: u64, value: MemValue) -> Result<(), SpError> {
        let len = value.width().bytes() as usize;
        self.write_memory(addr, &value.widen().to_le_bytes()[..len])
    }
}
