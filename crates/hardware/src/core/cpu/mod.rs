//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the single machine-mode hart
//! of an engine instance. It coordinates the following:
//! 1. **State Management:** Maintains registers, program counter, CSRs, and the LR/SC reservation.
//! 2. **Fetch:** Reads parcels through the instruction cache and expands compressed ones.
//! 3. **Execution:** Decodes and executes one instruction per step, taking traps in place.
//! 4. **System Integration:** Owns the bus with every mapped memory region.

/// Zicsr instruction execution.
pub mod csr;

/// Fetch, decode, and the integer instruction set.
pub mod execution;

/// F and D extension instructions.
pub mod float;

/// Load, store, and atomic memory access.
pub mod memory;

/// Trap entry and `mret`.
pub mod trap;

use tracing::debug;

use crate::common::{EngineError, RegisterFile};
use crate::config::Config;
use crate::core::arch::csr::Csrs;
use crate::core::arch::isa::Isa;
use crate::core::units::cache::InstructionCache;
use crate::soc::System;

/// Architectural state of the hart plus the system it is attached to.
pub struct Cpu {
    /// General Purpose and Floating Point Registers.
    pub regs: RegisterFile,
    /// Program Counter.
    pub pc: u64,
    /// Control and Status Registers.
    pub csrs: Csrs,
    /// Enabled extensions.
    pub isa: Isa,
    /// Load Reservation address (for LR/SC).
    pub load_reservation: Option<u64>,

    /// System Bus and Devices.
    pub bus: System,
    /// Instruction cache in front of fetch.
    pub icache: InstructionCache,

    /// Emit a `trace` event per executed instruction.
    pub trace: bool,
}

impl Cpu {
    /// Creates a hart attached to `system`.
    ///
    /// # Arguments
    ///
    /// * `system` - The bus with every guest memory region mapped.
    /// * `config` - ISA string, reset PC, trap vector, tracing, and icache settings.
    ///
    /// # Returns
    ///
    /// The hart in machine mode at `config.general.start_pc`, or
    /// [`EngineError::UnsupportedIsa`] when the ISA string is rejected.
    pub fn new(system: System, config: &Config) -> Result<Self, EngineError> {
        let isa = Isa::parse(&config.general.isa)?;
        let csrs = Csrs::new(isa.misa(), config.general.trap_vector);
        let icache = InstructionCache::new(&config.icache);
        let trace = config.general.trace_instructions || cfg!(feature = "always-trace");

        debug!(
            isa = isa.name(),
            start_pc = config.general.start_pc,
            mtvec = csrs.mtvec,
            icache_entries = icache.capacity(),
            "hart created"
        );

        Ok(Self {
            regs: RegisterFile::new(),
            pc: config.general.start_pc,
            csrs,
            isa,
            load_reservation: None,
            bus: system,
            icache,
            trace,
        })
    }

    /// Invalidates every cached instruction.
    pub fn flush_icache(&mut self) {
        self.icache.flush();
    }
}
