//! RISC-V RV64 simulation engine.
//!
//! This crate implements a functional, single-hart RV64IMAFDC simulator meant to be
//! embedded in other programs:
//! 1. **Core:** Machine-mode hart with GPR/FPR and CSR state, stepping one instruction at a time.
//! 2. **ISA:** Decoding and execution for RV64I/M/A/F/D/C and Zicsr/Zifencei.
//! 3. **SoC:** A bus of caller-described memory regions, owned or borrowed.
//! 4. **Simulation:** Configuration and the [`Simulator`] host interface.

/// Common types and constants (registers, traps, access types, errors).
pub mod common;
/// Engine configuration (defaults, JSON loading).
pub mod config;
/// CPU core (arch state, execution, memory access, traps, units).
pub mod core;
/// Instruction set (decode, field extraction, opcodes, RVC expansion).
pub mod isa;
/// Engine instance driven by embedders.
pub mod sim;
/// System-on-chip (builder, bus, memory regions, device trait).
pub mod soc;

/// Construction-time errors and architectural traps.
pub use crate::common::{EngineError, Trap};
/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, CSRs, icache, and the bus.
pub use crate::core::Cpu;
/// Engine instance; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Memory map types; describe regions with `MemoryRegion`.
pub use crate::soc::{MemoryRegion, System};
