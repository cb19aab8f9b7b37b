use spikelib::SimHandle;
use spikelib_core::{Config, MemoryRegion};

use super::encode::image;

/// Base of the RAM region every harness handle maps.
pub const RAM_BASE: u64 = 0x1000;

/// Size of that region.
pub const RAM_SIZE: u64 = 0x1000;

/// An address no region covers.
pub const UNMAPPED: u64 = 0x9000;

/// One zeroed region at `RAM_BASE`.
pub fn ram() -> Vec<MemoryRegion> {
    vec![MemoryRegion::zeroed(RAM_BASE, RAM_SIZE)]
}

/// A default RV64IMAFDC handle over `ram()`.
pub fn handle() -> SimHandle {
    SimHandle::new(ram()).expect("test handle must build")
}

/// A handle whose traps vector to `trap_vector`.
pub fn handle_with_vector(trap_vector: u64) -> SimHandle {
    let mut config = Config::default();
    config.general.trap_vector = trap_vector;
    SimHandle::with_config(ram(), &config).expect("test handle must build")
}

/// Writes `words` at `addr` through the memory façade.
pub fn load(handle: &mut SimHandle, addr: u64, words: &[u32]) {
    handle
        .write_memory(addr, &image(words))
        .expect("program must fit in RAM");
}
