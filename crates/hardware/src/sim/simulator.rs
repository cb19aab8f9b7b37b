//! Simulator: one hart plus its memory map, behind a narrow host interface.
//!
//! Embedders never touch the hart directly. They build a `Simulator` from a list
//! of regions, single-step it, and read or write architectural state and guest
//! memory through the accessors here.

use tracing::debug;

use crate::common::{AccessType, EngineError, Trap};
use crate::config::Config;
use crate::core::Cpu;
use crate::soc::{MemoryRegion, System};

/// Top-level engine instance.
pub struct Simulator {
    /// Hart state together with the bus it owns.
    pub cpu: Cpu,
}

impl Simulator {
    /// Maps `regions` and builds a hart according to `config`.
    ///
    /// # Errors
    ///
    /// Region validation and allocation errors from [`System::new`], and
    /// [`EngineError::UnsupportedIsa`] for a rejected ISA string.
    pub fn new(regions: Vec<MemoryRegion>, config: &Config) -> Result<Self, EngineError> {
        let system = System::new(regions)?;
        let cpu = Cpu::new(system, config)?;
        debug!(
            regions = cpu.bus.bus.device_count(),
            isa = cpu.isa.name(),
            "simulator ready"
        );
        Ok(Self { cpu })
    }

    /// Executes one instruction; see [`Cpu::step`].
    #[inline]
    pub fn step(&mut self) -> Result<(), Trap> {
        self.cpu.step()
    }

    /// Current program counter.
    pub fn pc(&self) -> u64 {
        self.cpu.pc
    }

    /// Moves the program counter; nothing is fetched until the next step.
    pub fn set_pc(&mut self, pc: u64) {
        self.cpu.pc = pc;
    }

    /// Reads integer register `idx` (0-31).
    pub fn read_x(&self, idx: usize) -> u64 {
        self.cpu.regs.read(idx)
    }

    /// Writes integer register `idx` (0-31); writes to `x0` are dropped.
    pub fn write_x(&mut self, idx: usize, value: u64) {
        self.cpu.regs.write(idx, value);
    }

    /// Reads the raw 64-bit container of f-register `idx`.
    pub fn read_f(&self, idx: usize) -> u64 {
        self.cpu.regs.read_f(idx)
    }

    /// Writes the raw 64-bit container of f-register `idx`.
    pub fn write_f(&mut self, idx: usize, value: u64) {
        self.cpu.regs.write_f(idx, value);
        self.cpu.csrs.mark_fp_dirty();
    }

    /// Cause of the most recent trap.
    pub fn mcause(&self) -> u64 {
        self.cpu.csrs.mcause
    }

    /// Trap vector base.
    pub fn mtvec(&self) -> u64 {
        self.cpu.csrs.mtvec
    }

    /// Instructions stepped so far, trapping ones included.
    pub fn instret(&self) -> u64 {
        self.cpu.csrs.minstret
    }

    /// Reads a CSR by address, as `csrr` would.
    pub fn read_csr(&self, addr: u32) -> Option<u64> {
        self.cpu.csrs.read(addr)
    }

    /// Host read of `size` bytes (1, 2, 4, or 8) at a naturally aligned address.
    pub fn load(&mut self, addr: u64, size: u64) -> Result<u64, Trap> {
        self.cpu.read_mem(addr, size, AccessType::Read)
    }

    /// Host write of the low `size` bytes (1, 2, 4, or 8) of `value`.
    pub fn store(&mut self, addr: u64, size: u64, value: u64) -> Result<(), Trap> {
        self.cpu.write_mem(addr, size, value)
    }

    /// Returns `true` if every byte of `[addr, addr + len)` is backed by a region.
    pub fn is_mapped(&self, addr: u64, len: u64) -> bool {
        self.cpu.bus.bus.is_mapped(addr, len)
    }

    /// Drops every cached instruction so the next fetch sees current memory.
    pub fn flush_icache(&mut self) {
        self.cpu.flush_icache();
    }
}
