//! C ABI for embedding the spikelib RV64 simulator.
//!
//! This crate wraps a [`spikelib_core::Simulator`] in an owning handle and exposes
//! it to C hosts. It provides:
//! 1. **Lifecycle:** [`SimHandle`] construction from a region list and ISA string or config.
//! 2. **Registers and memory:** Typed façades over the 65 architectural registers and guest RAM.
//! 3. **Execution:** The bounded driver [`SimHandle::spike_start`] and fault classification.
//! 4. **Errors:** The fixed [`SpError`] numbering and its strings.
//! 5. **C entry points:** `extern "C"` wrappers in [`ffi`].

/// C region descriptors and error conversions.
pub mod conversion;
/// Bounded execution driver.
pub mod driver;
/// Wire error codes and strings.
pub mod error;
/// Trap classification.
pub mod fault;
/// `extern "C"` entry points.
pub mod ffi;
/// Memory access façade.
pub mod memory;
/// Register access façade.
pub mod register;
/// Handle lifecycle.
pub mod system;
/// Logging setup and version.
pub mod utils;

pub use conversion::memory_region;
pub use driver::{RunReport, StopReason};
pub use error::{ABI_VERSION, SpError};
pub use memory::{MemValue, Width};
pub use register::{RegId, RegValue};
pub use system::SimHandle;
