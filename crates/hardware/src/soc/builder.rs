//! System construction and the top-level `System` type.
//!
//! Validates the requested memory map and attaches one [`Memory`] device per
//! region to a fresh [`Bus`].

use tracing::debug;

use crate::common::EngineError;
use crate::soc::interconnect::Bus;
use crate::soc::memory::{Memory, MemoryRegion};
use crate::soc::traits::Device;

/// The simulated machine outside the hart: its memory map.
pub struct System {
    /// System interconnect routing accesses to memory regions.
    pub bus: Bus,
}

impl System {
    /// Builds a system from a list of memory regions.
    ///
    /// # Errors
    ///
    /// * [`EngineError::EmptyRegion`] for a zero-sized region.
    /// * [`EngineError::RegionOverflow`] when `base + size` leaves the address space.
    /// * [`EngineError::OverlappingRegions`] when two regions share a byte.
    /// * [`EngineError::AllocationFailed`] when backing storage cannot be allocated.
    pub fn new(regions: Vec<MemoryRegion>) -> Result<Self, EngineError> {
        validate(&regions)?;

        let mut bus = Bus::new();
        for region in regions {
            let (base, buffer) = region.into_buffer()?;
            let memory = Memory::new(buffer, base);
            debug!(
                device = memory.name(),
                size = memory.address_range().1,
                "mapping memory region"
            );
            bus.add_device(Box::new(memory));
        }
        Ok(Self { bus })
    }
}

/// Checks sizes, bounds and pairwise disjointness without allocating anything.
fn validate(regions: &[MemoryRegion]) -> Result<(), EngineError> {
    let mut spans = Vec::with_capacity(regions.len());
    for region in regions {
        let (base, size) = (region.base(), region.size());
        if size == 0 {
            return Err(EngineError::EmptyRegion { base });
        }
        let end = base
            .checked_add(size)
            .ok_or(EngineError::RegionOverflow { base, size })?;
        spans.push((base, end));
    }

    spans.sort_unstable();
    for pair in spans.windows(2) {
        let ((first, first_end), (second, _)) = (pair[0], pair[1]);
        if second < first_end {
            return Err(EngineError::OverlappingRegions { first, second });
        }
    }
    Ok(())
}
