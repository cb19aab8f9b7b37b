//! Configuration system for the engine.
//!
//! This module defines the configuration structures used to parameterize a hart.
//! It provides:
//! 1. **Defaults:** Baseline values (ISA string, reset PC, trap vector, icache size).
//! 2. **Structures:** Hierarchical config for general settings and the instruction cache.
//! 3. **Loaders:** JSON from a string or a file; every field is optional.
//!
//! Use `Config::default()` for the stock RV64IMAFDC hart.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::EngineError;

/// Default configuration constants for the engine.
mod defaults {
    use crate::common::constants;

    /// ISA descriptor of a default hart.
    pub const ISA: &str = constants::DEFAULT_ISA;

    /// Program counter after construction.
    pub const START_PC: u64 = constants::DEFAULT_START_PC;

    /// Address the hart jumps to on a trap.
    pub const TRAP_VECTOR: u64 = constants::DEFAULT_TRAP_VECTOR;

    /// Number of direct-mapped instruction cache entries.
    pub const ICACHE_ENTRIES: usize = 1024;
}

/// Root configuration structure for the engine.
///
/// # Examples
///
/// ```
/// use spikelib_core::config::Config;
///
/// let json = r#"{
///     "general": {
///         "isa": "rv64imac",
///         "trace_instructions": true
///     },
///     "icache": {
///         "entries": 256
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.isa, "rv64imac");
/// assert_eq!(config.general.start_pc, 0x1000);
/// assert!(config.icache.enabled);
/// assert_eq!(config.icache.entries, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General hart settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Instruction cache settings
    #[serde(default)]
    pub icache: IcacheConfig,
}

impl Config {
    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Returns a default configuration with a different ISA descriptor.
    pub fn with_isa(isa: &str) -> Self {
        Self {
            general: GeneralConfig {
                isa: isa.to_string(),
                ..GeneralConfig::default()
            },
            ..Self::default()
        }
    }
}

/// General hart settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// ISA descriptor, e.g. `"RV64IMAFDC"` or `"rv64gc"`
    #[serde(default = "GeneralConfig::default_isa")]
    pub isa: String,

    /// Initial PC value
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u64,

    /// Initial `mtvec`
    #[serde(default = "GeneralConfig::default_trap_vector")]
    pub trap_vector: u64,

    /// Emit a `trace` event for every executed instruction
    #[serde(default)]
    pub trace_instructions: bool,
}

impl GeneralConfig {
    fn default_isa() -> String {
        defaults::ISA.to_string()
    }

    fn default_start_pc() -> u64 {
        defaults::START_PC
    }

    fn default_trap_vector() -> u64 {
        defaults::TRAP_VECTOR
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            isa: Self::default_isa(),
            start_pc: defaults::START_PC,
            trap_vector: defaults::TRAP_VECTOR,
            trace_instructions: false,
        }
    }
}

/// Instruction cache configuration.
///
/// The cache is direct-mapped and holds decoded parcels keyed by PC. A size that
/// is not a power of two is rounded up when the cache is built.
#[derive(Debug, Clone, Deserialize)]
pub struct IcacheConfig {
    /// Whether fetches go through the cache at all
    #[serde(default = "IcacheConfig::default_enabled")]
    pub enabled: bool,

    /// Number of entries
    #[serde(default = "IcacheConfig::default_entries")]
    pub entries: usize,
}

impl IcacheConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_entries() -> usize {
        defaults::ICACHE_ENTRIES
    }
}

impl Default for IcacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            entries: defaults::ICACHE_ENTRIES,
        }
    }
}
