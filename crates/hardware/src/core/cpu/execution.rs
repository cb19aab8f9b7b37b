//! Main Execution Loop.
//!
//! This module implements one architectural step of the hart. It performs the following:
//! 1. **Fetch:** Checks PC alignment, consults the icache, and reads one or two halfwords.
//! 2. **Decode:** Expands compressed parcels and extracts fields and immediates.
//! 3. **Execute:** Runs the instruction and commits its result and the next PC.
//! 4. **Trap Entry:** A failing step takes the trap and reports it to the caller.

use tracing::trace;

use super::Cpu;
use crate::common::Trap;
use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, COMPRESSED_INSTRUCTION_VALUE, INSTRUCTION_SIZE_16,
    INSTRUCTION_SIZE_32,
};
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::cache::Fetched;
use crate::isa::decode::{Decoded, decode};
use crate::isa::funct::{alu, branch, funct7, misc_mem, system};
use crate::isa::opcodes;
use crate::isa::rvc;

impl Cpu {
    /// Executes one instruction.
    ///
    /// The cycle and retired-instruction counters advance whether or not the
    /// instruction traps. On a trap the hart has already vectored to `mtvec`
    /// when this returns.
    ///
    /// # Returns
    ///
    /// `Ok(())` on normal completion, or the trap that was taken.
    pub fn step(&mut self) -> Result<(), Trap> {
        let pc = self.pc;
        let result = self.fetch().and_then(|fetched| self.execute(fetched));

        self.csrs.mcycle = self.csrs.mcycle.wrapping_add(1);
        self.csrs.minstret = self.csrs.minstret.wrapping_add(1);

        result.inspect_err(|cause| self.trap(cause, pc))
    }

    /// Fetches the instruction at PC.
    pub fn fetch(&mut self) -> Result<Fetched, Trap> {
        let pc = self.pc;
        if pc & self.isa.fetch_align_mask() != 0 {
            return Err(Trap::InstructionAddressMisaligned(pc));
        }
        if let Some(fetched) = self.icache.lookup(pc) {
            return Ok(fetched);
        }

        let low = self
            .bus
            .bus
            .read_u16(pc)
            .ok_or(Trap::InstructionAccessFault(pc))?;

        let fetched = if low & COMPRESSED_INSTRUCTION_MASK != COMPRESSED_INSTRUCTION_VALUE {
            if !self.isa.c {
                return Err(Trap::IllegalInstruction(u32::from(low)));
            }
            Fetched {
                inst: rvc::expand(low),
                parcel: u32::from(low),
                size: INSTRUCTION_SIZE_16,
            }
        } else {
            // The upper half may live in the next region.
            let upper = pc.wrapping_add(INSTRUCTION_SIZE_16);
            let high = self
                .bus
                .bus
                .read_u16(upper)
                .ok_or(Trap::InstructionAccessFault(upper))?;
            let raw = u32::from(low) | (u32::from(high) << 16);
            Fetched {
                inst: raw,
                parcel: raw,
                size: INSTRUCTION_SIZE_32,
            }
        };

        self.icache.insert(pc, fetched);
        Ok(fetched)
    }

    /// Executes a fetched instruction and commits the next PC.
    fn execute(&mut self, fetched: Fetched) -> Result<(), Trap> {
        let d = decode(fetched.inst);
        let pc = self.pc;
        let illegal = Trap::IllegalInstruction(fetched.parcel);
        let mut next_pc = pc.wrapping_add(fetched.size);

        if self.trace {
            trace!(pc, inst = fetched.parcel, "exec {pc:#x}: {:#010x}", fetched.parcel);
        }

        // An expanded parcel of zero is a reserved compressed encoding.
        if d.raw == 0 {
            return Err(illegal);
        }

        match d.opcode {
            opcodes::OP_LUI => self.regs.write(d.rd, d.imm as u64),
            opcodes::OP_AUIPC => self.regs.write(d.rd, pc.wrapping_add(d.imm as u64)),
            opcodes::OP_JAL => {
                let target = pc.wrapping_add(d.imm as u64);
                self.check_target(target)?;
                self.regs.write(d.rd, next_pc);
                next_pc = target;
            }
            opcodes::OP_JALR => {
                if d.funct3 != 0 {
                    return Err(illegal);
                }
                let target = self.regs.read(d.rs1).wrapping_add(d.imm as u64) & !1;
                self.check_target(target)?;
                self.regs.write(d.rd, next_pc);
                next_pc = target;
            }
            opcodes::OP_BRANCH => {
                if self.branch_taken(&d, illegal)? {
                    let target = pc.wrapping_add(d.imm as u64);
                    self.check_target(target)?;
                    next_pc = target;
                }
            }
            opcodes::OP_LOAD => self.exec_load(&d, illegal)?,
            opcodes::OP_STORE => self.exec_store(&d, illegal)?,
            opcodes::OP_IMM => self.exec_op_imm(&d, false, illegal)?,
            opcodes::OP_IMM_32 => self.exec_op_imm(&d, true, illegal)?,
            opcodes::OP_REG => self.exec_op(&d, false, illegal)?,
            opcodes::OP_REG_32 => self.exec_op(&d, true, illegal)?,
            opcodes::OP_MISC_MEM => match d.funct3 {
                misc_mem::FENCE => {}
                misc_mem::FENCE_I => self.flush_icache(),
                _ => return Err(illegal),
            },
            opcodes::OP_SYSTEM => {
                if let Some(target) = self.exec_system(&d, illegal)? {
                    next_pc = target;
                }
            }
            opcodes::OP_AMO if self.isa.a => self.exec_amo(&d, illegal)?,
            opcodes::OP_LOAD_FP
            | opcodes::OP_STORE_FP
            | opcodes::OP_FMADD
            | opcodes::OP_FMSUB
            | opcodes::OP_FNMSUB
            | opcodes::OP_FNMADD
            | opcodes::OP_FP
                if self.isa.f =>
            {
                self.exec_float(&d, illegal)?
            }
            _ => return Err(illegal),
        }

        self.pc = next_pc;
        Ok(())
    }

    /// Jumps and taken branches must land on a fetchable address.
    #[inline]
    fn check_target(&self, target: u64) -> Result<(), Trap> {
        if target & self.isa.fetch_align_mask() != 0 {
            Err(Trap::InstructionAddressMisaligned(target))
        } else {
            Ok(())
        }
    }

    fn branch_taken(&self, d: &Decoded, illegal: Trap) -> Result<bool, Trap> {
        let a = self.regs.read(d.rs1);
        let b = self.regs.read(d.rs2);
        let taken = match d.funct3 {
            branch::BEQ => a == b,
            branch::BNE => a != b,
            branch::BLT => (a as i64) < (b as i64),
            branch::BGE => (a as i64) >= (b as i64),
            branch::BLTU => a < b,
            branch::BGEU => a >= b,
            _ => return Err(illegal),
        };
        Ok(taken)
    }

    /// Register-immediate ALU instructions (`OP-IMM` and `OP-IMM-32`).
    fn exec_op_imm(&mut self, d: &Decoded, is32: bool, illegal: Trap) -> Result<(), Trap> {
        // RV64 shifts carry a 6-bit shamt under a 6-bit funct6; the W forms a 5-bit
        // shamt under the full funct7.
        let shift_kind = if is32 { d.funct7 } else { d.raw >> 26 };
        let arith = if is32 { funct7::SUB_SRA } else { funct7::SUB_SRA >> 1 };

        let op = match d.funct3 {
            alu::ADD_SUB => AluOp::Add,
            alu::SLL if shift_kind == 0 => AluOp::Sll,
            alu::SRL_SRA if shift_kind == 0 => AluOp::Srl,
            alu::SRL_SRA if shift_kind == arith => AluOp::Sra,
            alu::SLT if !is32 => AluOp::Slt,
            alu::SLTU if !is32 => AluOp::Sltu,
            alu::XOR if !is32 => AluOp::Xor,
            alu::OR if !is32 => AluOp::Or,
            alu::AND if !is32 => AluOp::And,
            _ => return Err(illegal),
        };

        let value = Alu::execute(op, self.regs.read(d.rs1), d.imm as u64, is32);
        self.regs.write(d.rd, value);
        Ok(())
    }

    /// Register-register ALU instructions (`OP` and `OP-32`).
    fn exec_op(&mut self, d: &Decoded, is32: bool, illegal: Trap) -> Result<(), Trap> {
        let Some(op) = AluOp::from_reg(d.funct3, d.funct7) else {
            return Err(illegal);
        };
        if op.is_muldiv() && !self.isa.m {
            return Err(illegal);
        }
        let word_form = matches!(
            op,
            AluOp::Add
                | AluOp::Sub
                | AluOp::Sll
                | AluOp::Srl
                | AluOp::Sra
                | AluOp::Mul
                | AluOp::Div
                | AluOp::Divu
                | AluOp::Rem
                | AluOp::Remu
        );
        if is32 && !word_form {
            return Err(illegal);
        }

        let value = Alu::execute(op, self.regs.read(d.rs1), self.regs.read(d.rs2), is32);
        self.regs.write(d.rd, value);
        Ok(())
    }

    /// `SYSTEM` instructions. Returns the new PC for `mret`.
    fn exec_system(&mut self, d: &Decoded, illegal: Trap) -> Result<Option<u64>, Trap> {
        if d.funct3 != system::PRIV {
            self.exec_csr(d, illegal)?;
            return Ok(None);
        }
        match d.raw {
            opcodes::ECALL => Err(Trap::EnvironmentCallFromMMode),
            opcodes::EBREAK => Err(Trap::Breakpoint(self.pc)),
            opcodes::MRET => Ok(Some(self.mret())),
            opcodes::WFI => Ok(None),
            _ => Err(illegal),
        }
    }
}
