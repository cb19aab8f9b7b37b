//! Common types shared by every part of the engine.
//!
//! This module provides the building blocks used by the hart, the bus, and the simulator:
//! 1. **Constants:** Instruction sizes, field masks, and reset values.
//! 2. **Memory Access:** Classification of accesses (Fetch/Read/Write) used to pick fault causes.
//! 3. **Error Handling:** Architectural traps and construction-time engine errors.
//! 4. **Register Management:** A unified interface for GPR and FPR access.

/// Common constants used throughout the engine.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Trap and engine error definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{EngineError, Trap};
pub use reg::RegisterFile;
