//! Classification of the last trap into an error code.

use spikelib_core::isa::cause::exception;

use crate::error::SpError;
use crate::system::SimHandle;

/// Maps trap state to the error code a host sees.
///
/// A misaligned fetch only counts once the hart has vectored, i.e. when `pc`
/// equals `mtvec`. Breakpoints, environment calls and interrupts are not faults.
pub const fn classify(mcause: u64, mtvec: u64, pc: u64) -> SpError {
    match mcause {
        exception::INSTRUCTION_ADDRESS_MISALIGNED if pc == mtvec => SpError::FetchMisaligned,
        exception::INSTRUCTION_ACCESS_FAULT => SpError::FetchUnmapped,
        exception::ILLEGAL_INSTRUCTION => SpError::InstructionInvalid,
        exception::LOAD_ADDRESS_MISALIGNED => SpError::ReadMisaligned,
        exception::LOAD_ACCESS_FAULT => SpError::ReadUnmapped,
        exception::STORE_ADDRESS_MISALIGNED => SpError::WriteMisaligned,
        exception::STORE_ACCESS_FAULT => SpError::WriteUnmapped,
        _ => SpError::Ok,
    }
}

impl SimHandle {
    /// Error code for the hart's current `mcause`, `mtvec` and PC.
    pub fn fault_cause(&self) -> SpError {
        let sim = self.simulator();
        classify(sim.mcause(), sim.mtvec(), sim.pc())
    }
}
