//! Trap Handling Logic.
//!
//! The hart only runs in machine mode, so every exception is taken in M-mode:
//! 1. **Context Saving:** `mepc`, `mcause`, and `mtval` record where and why.
//! 2. **Interrupt Stack:** `MPIE` takes the old `MIE`, `MIE` is cleared, `MPP` stays M.
//! 3. **Vectoring:** Execution continues at `mtvec` (direct mode).
//! 4. **Return:** `mret` restores `MIE` and jumps back to `mepc`.

use tracing::debug;

use super::Cpu;
use crate::common::Trap;
use crate::core::arch::csr::{MSTATUS_MIE, MSTATUS_MPIE, MSTATUS_MPP};

impl Cpu {
    /// Takes a synchronous exception raised by the instruction at `epc`.
    pub fn trap(&mut self, cause: &Trap, epc: u64) {
        self.load_reservation = None;

        let mstatus = self.csrs.mstatus;
        let mut next = mstatus & !(MSTATUS_MIE | MSTATUS_MPIE);
        if mstatus & MSTATUS_MIE != 0 {
            next |= MSTATUS_MPIE;
        }
        self.csrs.mstatus = next | MSTATUS_MPP;

        self.csrs.mepc = epc;
        self.csrs.mcause = cause.cause();
        self.csrs.mtval = cause.tval();
        self.pc = self.csrs.mtvec;

        debug!(
            %cause,
            epc,
            mcause = self.csrs.mcause,
            mtvec = self.csrs.mtvec,
            "trap taken"
        );
    }

    /// Executes `mret` and returns the address to resume at.
    pub(crate) fn mret(&mut self) -> u64 {
        let mstatus = self.csrs.mstatus;
        let mut next = (mstatus & !MSTATUS_MIE) | MSTATUS_MPIE | MSTATUS_MPP;
        if mstatus & MSTATUS_MPIE != 0 {
            next |= MSTATUS_MIE;
        }
        self.csrs.mstatus = next;
        self.load_reservation = None;

        let mask = if self.isa.c { !1 } else { !3 };
        self.csrs.mepc & mask
    }
}
