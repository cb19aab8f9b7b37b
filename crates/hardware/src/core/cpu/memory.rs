//! Memory Access Helpers.
//!
//! This module provides the interface between the hart and the bus. It performs
//! the following:
//! 1. **Alignment:** Every access must be naturally aligned; misalignment traps before the bus is touched.
//! 2. **Routing:** Aligned accesses go to the device that contains them.
//! 3. **Fault Mapping:** An unclaimed access turns into the access fault of its type.
//! 4. **Atomics:** LR/SC with a single reservation and the AMO read-modify-write family.

use super::Cpu;
use crate::common::{AccessType, Trap};
use crate::isa::decode::Decoded;
use crate::isa::funct::{amo, width};

/// Sign-extends the low 32 bits.
#[inline]
const fn sext32(v: u64) -> u64 {
    v as u32 as i32 as i64 as u64
}

impl Cpu {
    /// Reads `size` bytes (1, 2, 4, or 8) at `addr`, zero-extended.
    ///
    /// `access` selects the trap kind; AMOs read with [`AccessType::Write`] so a
    /// failing read reports a store/AMO fault.
    pub fn read_mem(&mut self, addr: u64, size: u64, access: AccessType) -> Result<u64, Trap> {
        if addr & (size - 1) != 0 {
            return Err(access.misaligned(addr));
        }
        let bus = &mut self.bus.bus;
        let value = match size {
            1 => bus.read_u8(addr).map(u64::from),
            2 => bus.read_u16(addr).map(u64::from),
            4 => bus.read_u32(addr).map(u64::from),
            _ => bus.read_u64(addr),
        };
        value.ok_or_else(|| access.access_fault(addr))
    }

    /// Writes the low `size` bytes (1, 2, 4, or 8) of `value` at `addr`.
    pub fn write_mem(&mut self, addr: u64, size: u64, value: u64) -> Result<(), Trap> {
        if addr & (size - 1) != 0 {
            return Err(AccessType::Write.misaligned(addr));
        }
        let bus = &mut self.bus.bus;
        let done = match size {
            1 => bus.write_u8(addr, value as u8),
            2 => bus.write_u16(addr, value as u16),
            4 => bus.write_u32(addr, value as u32),
            _ => bus.write_u64(addr, value),
        };
        done.ok_or(AccessType::Write.access_fault(addr))
    }

    /// Executes an integer load.
    pub(crate) fn exec_load(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let addr = self.regs.read(d.rs1).wrapping_add(d.imm as u64);
        let value = match d.funct3 {
            width::B => self.read_mem(addr, 1, AccessType::Read)? as i8 as i64 as u64,
            width::H => self.read_mem(addr, 2, AccessType::Read)? as i16 as i64 as u64,
            width::W => sext32(self.read_mem(addr, 4, AccessType::Read)?),
            width::D => self.read_mem(addr, 8, AccessType::Read)?,
            width::BU => self.read_mem(addr, 1, AccessType::Read)?,
            width::HU => self.read_mem(addr, 2, AccessType::Read)?,
            width::WU => self.read_mem(addr, 4, AccessType::Read)?,
            _ => return Err(illegal),
        };
        self.regs.write(d.rd, value);
        Ok(())
    }

    /// Executes an integer store.
    pub(crate) fn exec_store(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let size = match d.funct3 {
            width::B => 1,
            width::H => 2,
            width::W => 4,
            width::D => 8,
            _ => return Err(illegal),
        };
        let addr = self.regs.read(d.rs1).wrapping_add(d.imm as u64);
        self.write_mem(addr, size, self.regs.read(d.rs2))
    }

    /// Executes LR, SC, or an AMO.
    pub(crate) fn exec_amo(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let size = match d.funct3 {
            width::W => 4,
            width::D => 8,
            _ => return Err(illegal),
        };
        let widen = |v: u64| if size == 4 { sext32(v) } else { v };
        let addr = self.regs.read(d.rs1);
        let src = self.regs.read(d.rs2);

        match d.funct7 >> 2 {
            amo::LR => {
                if d.rs2 != 0 {
                    return Err(illegal);
                }
                let value = self.read_mem(addr, size, AccessType::Read)?;
                self.load_reservation = Some(addr);
                self.regs.write(d.rd, widen(value));
            }
            amo::SC => {
                if addr & (size - 1) != 0 {
                    return Err(AccessType::Write.misaligned(addr));
                }
                let reserved = self.load_reservation.take() == Some(addr);
                if reserved {
                    self.write_mem(addr, size, src)?;
                }
                self.regs.write(d.rd, u64::from(!reserved));
            }
            funct5 => {
                let old = widen(self.read_mem(addr, size, AccessType::Write)?);
                let rhs = widen(src);
                // Sign-extended words keep their unsigned order, so MINU/MAXU
                // compare the same way for both widths.
                let new = match funct5 {
                    amo::SWAP => rhs,
                    amo::ADD => old.wrapping_add(rhs),
                    amo::XOR => old ^ rhs,
                    amo::AND => old & rhs,
                    amo::OR => old | rhs,
                    amo::MIN => (old as i64).min(rhs as i64) as u64,
                    amo::MAX => (old as i64).max(rhs as i64) as u64,
                    amo::MINU => old.min(rhs),
                    amo::MAXU => old.max(rhs),
                    _ => return Err(illegal),
                };
                self.write_mem(addr, size, new)?;
                self.regs.write(d.rd, old);
            }
        }
        Ok(())
    }
}
