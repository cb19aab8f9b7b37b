//! Simulator handle lifecycle.
//!
//! A [`SimHandle`] owns one engine instance: a single hart in machine mode plus
//! the memory regions it was built with. Construction validates the region list
//! and the ISA string; releasing consumes the handle, so it happens exactly once.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use spikelib_core::config::Config;
use spikelib_core::{MemoryRegion, Simulator};
use tracing::{debug, warn};

use crate::error::SpError;

/// ISA descriptor used by [`SimHandle::new`].
pub const DEFAULT_ISA: &str = "RV64IMAFDC";

/// An owned engine instance.
///
/// The handle is `Send` but not `Sync`: one thread drives it at a time.
pub struct SimHandle {
    sim: Simulator,
}

impl SimHandle {
    /// Builds a default RV64IMAFDC machine over `regions`.
    ///
    /// # Errors
    ///
    /// See [`SimHandle::with_config`].
    pub fn new(regions: Vec<MemoryRegion>) -> Result<Self, SpError> {
        Self::with_isa(regions, DEFAULT_ISA)
    }

    /// Builds a machine with the given ISA descriptor.
    ///
    /// # Errors
    ///
    /// See [`SimHandle::with_config`].
    pub fn with_isa(regions: Vec<MemoryRegion>, isa: &str) -> Result<Self, SpError> {
        Self::with_config(regions, &Config::with_isa(isa))
    }

    /// Builds a machine from a full engine configuration.
    ///
    /// # Errors
    ///
    /// * [`SpError::MapInvalid`] for an empty, overflowing, or overlapping region.
    /// * [`SpError::NoMemory`] when the ISA is rejected, storage cannot be
    ///   allocated, or construction panics.
    pub fn with_config(regions: Vec<MemoryRegion>, config: &Config) -> Result<Self, SpError> {
        let built = panic::catch_unwind(AssertUnwindSafe(|| Simulator::new(regions, config)));
        match built {
            Ok(Ok(sim)) => {
                debug!(isa = %config.general.isa, pc = sim.pc(), "simulator handle created");
                Ok(Self { sim })
            }
            Ok(Err(err)) => {
                warn!(%err, "engine construction failed");
                Err(err.into())
            }
            Err(_) => {
                warn!("engine construction panicked");
                Err(SpError::NoMemory)
            }
        }
    }

    /// Destroys the engine. Borrowed region memory is left to its owner.
    pub fn release(self) {
        debug!(
            pc = self.sim.pc(),
            instret = self.sim.instret(),
            "simulator handle released"
        );
        drop(self);
    }

    /// The engine behind this handle.
    pub const fn simulator(&self) -> &Simulator {
        &self.sim
    }

    /// Mutable access to the engine behind this handle.
    pub const fn simulator_mut(&mut self) -> &mut Simulator {
        &mut self.sim
    }
}

impl fmt::Debug for SimHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimHandle")
            .field("isa", &self.sim.cpu.isa.name())
            .field("pc", &format_args!("{:#x}", self.sim.pc()))
            .finish_non_exhaustive()
    }
}
