//! System-on-Chip (SoC) Components.
//!
//! The memory map the hart runs against: the bus, the memory region devices
//! attached to it, and the builder that validates and assembles them.

/// System builder.
pub mod builder;

/// System bus interconnect and routing.
pub mod interconnect;

/// Memory regions and their backing storage.
pub mod memory;

/// Device trait for bus-attached components.
pub mod traits;

pub use builder::System;
pub use memory::MemoryRegion;
