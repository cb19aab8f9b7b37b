//! Bounded execution driver.
//!
//! Runs the hart from `begin` until the PC reaches `end`, an instruction cap or
//! deadline is hit, or a step faults. All stop conditions are sampled after
//! every step; when several hold at once the end address wins, then the cap,
//! then the deadline, then the fault.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::SpError;
use crate::register::{RegId, RegValue};
use crate::system::SimHandle;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The PC reached the end address.
    ReachedEnd,
    /// The instruction cap was reached.
    MaxCountReached,
    /// The deadline passed.
    Timeout,
    /// A step faulted; the code classifies the trap.
    Fault(SpError),
    /// The loop stopped with no condition holding.
    Unknown,
}

impl StopReason {
    /// Wire code of the reason.
    pub const fn code(self) -> SpError {
        match self {
            Self::ReachedEnd => SpError::Ok,
            Self::MaxCountReached => SpError::MaxCountReached,
            Self::Timeout => SpError::Timeout,
            Self::Fault(code) => code,
            Self::Unknown => SpError::Unknown,
        }
    }
}

/// Outcome of one [`SimHandle::spike_start`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Why the run stopped.
    pub reason: StopReason,
    /// Steps taken, the faulting one included.
    pub instructions: u64,
    /// Wall time from the start of the run to the stop.
    pub elapsed: Duration,
}

impl RunReport {
    /// `Ok` when the end address was reached, the stop code otherwise.
    pub const fn into_result(self) -> Result<Self, SpError> {
        match self.reason.code() {
            SpError::Ok => Ok(self),
            code => Err(code),
        }
    }
}

/// Stop conditions sampled after one step.
#[derive(Clone, Copy, Debug, Default)]
struct Predicates {
    reached_end: bool,
    capped: bool,
    timed_out: bool,
    fault: Option<SpError>,
}

impl Predicates {
    const fn any(&self) -> bool {
        self.reached_end || self.capped || self.timed_out || self.fault.is_some()
    }

    const fn classify(&self) -> StopReason {
        if self.reached_end {
            StopReason::ReachedEnd
        } else if self.capped {
            StopReason::MaxCountReached
        } else if self.timed_out {
            StopReason::Timeout
        } else if let Some(code) = self.fault {
            StopReason::Fault(code)
        } else {
            StopReason::Unknown
        }
    }
}

impl SimHandle {
    /// Runs from `begin` until the PC equals `end`.
    ///
    /// A zero `timeout` or `max_instructions` means unbounded. Traps that do not
    /// classify as faults (`ecall`, `ebreak`) are taken and execution continues
    /// at `mtvec`. Starting with `begin == end` stops at once with zero steps.
    /// A faulting step that vectors to `end` still counts as reaching it, and
    /// [`SimHandle::fault_cause`] keeps the trap.
    pub fn spike_start(
        &mut self,
        begin: u64,
        end: u64,
        timeout: Duration,
        max_instructions: usize,
    ) -> RunReport {
        self.write_register(RegId::PC, RegValue::U64(begin));
        let start = Instant::now();

        let mut executed: u64 = 0;
        let mut state = Predicates {
            reached_end: self.simulator().pc() == end,
            ..Predicates::default()
        };
        while !state.any() {
            let fault = self
                .simulator_mut()
                .step()
                .err()
                .map(|_| self.fault_cause())
                .filter(|code| *code != SpError::Ok);
            executed += 1;

            state = Predicates {
                reached_end: self.simulator().pc() == end,
                capped: max_instructions != 0 && executed >= max_instructions as u64,
                timed_out: !timeout.is_zero() && start.elapsed() >= timeout,
                fault,
            };
        }

        let report = RunReport {
            reason: state.classify(),
            instructions: executed,
            elapsed: start.elapsed(),
        };
        debug!(
            begin,
            end,
            reason = ?report.reason,
            instructions = report.instructions,
            elapsed_us = report.elapsed.as_micros() as u64,
            "run stopped"
        );
        report
    }
}
