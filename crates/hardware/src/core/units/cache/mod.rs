//! Direct-Mapped Instruction Cache.
//!
//! Caches fetched parcels by PC so a hot loop does not go back to the bus on every
//! step. Entries hold the expanded 32-bit encoding, the original parcel, and its
//! size. Guest stores do not invalidate the cache; `fence.i` and host writes do.

use tracing::{debug, warn};

use crate::config::IcacheConfig;

/// One fetched instruction as seen by decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fetched {
    /// 32-bit encoding after RVC expansion.
    pub inst: u32,
    /// Bits as they sit in memory (16 or 32 of them).
    pub parcel: u32,
    /// Parcel size in bytes, 2 or 4.
    pub size: u64,
}

#[derive(Clone, Copy, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    fetched: Fetched,
}

/// Instruction cache indexed by halfword address.
pub struct InstructionCache {
    lines: Vec<CacheLine>,
    mask: u64,
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that went to the bus.
    pub misses: u64,
}

impl InstructionCache {
    /// Builds a cache from its configuration.
    ///
    /// A disabled cache, or one with zero entries, never hits. A size that is not
    /// a power of two is rounded up.
    pub fn new(config: &IcacheConfig) -> Self {
        if !config.enabled || config.entries == 0 {
            return Self::disabled();
        }
        let mut entries = config.entries;
        if !entries.is_power_of_two() {
            let rounded = entries.next_power_of_two();
            warn!(entries, rounded, "icache size is not a power of two; rounding up");
            entries = rounded;
        }
        Self {
            lines: vec![CacheLine::default(); entries],
            mask: entries as u64 - 1,
            hits: 0,
            misses: 0,
        }
    }

    /// A cache that holds nothing.
    pub const fn disabled() -> Self {
        Self {
            lines: Vec::new(),
            mask: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns `true` when lookups can hit.
    pub fn is_enabled(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Number of entries.
    pub fn capacity(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    fn index(&self, pc: u64) -> usize {
        ((pc >> 1) & self.mask) as usize
    }

    /// Returns the cached instruction at `pc`, if any.
    #[inline]
    pub fn lookup(&mut self, pc: u64) -> Option<Fetched> {
        if self.lines.is_empty() {
            return None;
        }
        let line = self.lines[self.index(pc)];
        if line.valid && line.tag == pc {
            self.hits += 1;
            Some(line.fetched)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Records the instruction fetched at `pc`.
    #[inline]
    pub fn insert(&mut self, pc: u64, fetched: Fetched) {
        if self.lines.is_empty() {
            return;
        }
        let idx = self.index(pc);
        self.lines[idx] = CacheLine {
            tag: pc,
            valid: true,
            fetched,
        };
    }

    /// Invalidates every entry.
    pub fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        for line in &mut self.lines {
            line.valid = false;
        }
        debug!(entries = self.lines.len(), "icache flushed");
    }
}
