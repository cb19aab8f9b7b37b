//! Zicsr instruction execution.
//!
//! `csrrw`/`csrrs`/`csrrc` and their immediate forms. A CSR is always read, so
//! an unknown address traps even when the result is discarded. The write half is
//! skipped for set/clear with a zero source, which makes `csrr` legal on
//! read-only counters.

use super::Cpu;
use crate::common::Trap;
use crate::isa::decode::Decoded;
use crate::isa::funct::system;
use crate::isa::instruction::InstructionBits;

impl Cpu {
    /// Executes a CSR instruction.
    pub(crate) fn exec_csr(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let addr = d.raw.csr();
        let src = match d.funct3 {
            system::CSRRW | system::CSRRS | system::CSRRC => self.regs.read(d.rs1),
            system::CSRRWI | system::CSRRSI | system::CSRRCI => d.rs1 as u64,
            _ => return Err(illegal),
        };

        let Some(old) = self.csrs.read(addr) else {
            return Err(illegal);
        };

        let new = match d.funct3 & 0b11 {
            0b01 => Some(src),
            0b10 if d.rs1 != 0 => Some(old | src),
            0b11 if d.rs1 != 0 => Some(old & !src),
            _ => None,
        };
        if let Some(value) = new {
            if !self.csrs.write(addr, value) {
                return Err(illegal);
            }
        }

        self.regs.write(d.rd, old);
        Ok(())
    }
}
