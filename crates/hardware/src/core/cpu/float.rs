//! Floating-point instruction execution.
//!
//! Decodes the F and D opcodes into FPU operations and commits the results. Any
//! write to an f-register or to `fflags` marks `mstatus.FS` dirty. Instructions
//! that carry an `rm` field resolve it against `frm`; a reserved mode is an
//! illegal instruction.

use super::Cpu;
use crate::common::{AccessType, Trap};
use crate::core::units::fpu::exception_flags::FpFlags;
use crate::core::units::fpu::nan_handling::box_f32;
use crate::core::units::fpu::rounding_modes::RoundingMode;
use crate::core::units::fpu::{FpOp, Fpu, IntKind, Precision};
use crate::isa::decode::Decoded;
use crate::isa::funct::{fp, width};
use crate::isa::opcodes;

impl Cpu {
    /// Executes an instruction from one of the floating-point opcodes.
    pub(crate) fn exec_float(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        match d.opcode {
            opcodes::OP_LOAD_FP => self.exec_fp_load(d, illegal),
            opcodes::OP_STORE_FP => self.exec_fp_store(d, illegal),
            opcodes::OP_FP => self.exec_fp_op(d, illegal),
            _ => self.exec_fp_fma(d, illegal),
        }
    }

    /// Format selected by a `fmt` field, if that format is enabled.
    fn precision(&self, fmt: u32) -> Option<Precision> {
        match fmt {
            fp::FMT_S => Some(Precision::Single),
            fp::FMT_D if self.isa.d => Some(Precision::Double),
            _ => None,
        }
    }

    fn rounding(&self, field: u32) -> Option<RoundingMode> {
        RoundingMode::resolve(field, self.csrs.frm)
    }

    /// Writes an f-register and accrues `flags`.
    fn commit_f(&mut self, rd: usize, value: u64, flags: FpFlags) {
        self.regs.write_f(rd, value);
        self.csrs.accrue_fflags(flags.bits());
        self.csrs.mark_fp_dirty();
    }

    /// Writes an x-register and accrues `flags`.
    fn commit_x(&mut self, rd: usize, value: u64, flags: FpFlags) {
        self.regs.write(rd, value);
        if !flags.is_empty() {
            self.csrs.accrue_fflags(flags.bits());
            self.csrs.mark_fp_dirty();
        }
    }

    fn exec_fp_load(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let addr = self.regs.read(d.rs1).wrapping_add(d.imm as u64);
        let value = match d.funct3 {
            width::W => box_f32(self.read_mem(addr, 4, AccessType::Read)? as u32),
            width::D if self.isa.d => self.read_mem(addr, 8, AccessType::Read)?,
            _ => return Err(illegal),
        };
        self.commit_f(d.rd, value, FpFlags::NONE);
        Ok(())
    }

    fn exec_fp_store(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let size = match d.funct3 {
            width::W => 4,
            width::D if self.isa.d => 8,
            _ => return Err(illegal),
        };
        let addr = self.regs.read(d.rs1).wrapping_add(d.imm as u64);
        self.write_mem(addr, size, self.regs.read_f(d.rs2))
    }

    fn exec_fp_fma(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let op = match d.opcode {
            opcodes::OP_FMADD => FpOp::MAdd,
            opcodes::OP_FMSUB => FpOp::MSub,
            opcodes::OP_FNMSUB => FpOp::NMSub,
            _ => FpOp::NMAdd,
        };
        let (Some(prec), Some(rm)) = (self.precision(d.funct7 & 0b11), self.rounding(d.funct3))
        else {
            return Err(illegal);
        };
        let (value, flags) = Fpu::execute(
            op,
            prec,
            self.regs.read_f(d.rs1),
            self.regs.read_f(d.rs2),
            self.regs.read_f(d.rs3),
            rm,
        );
        self.commit_f(d.rd, value, flags);
        Ok(())
    }

    fn exec_fp_op(&mut self, d: &Decoded, illegal: Trap) -> Result<(), Trap> {
        let Some(prec) = self.precision(d.funct7 & 0b11) else {
            return Err(illegal);
        };
        let a = self.regs.read_f(d.rs1);
        let b = self.regs.read_f(d.rs2);

        match d.funct7 >> 2 {
            funct5 @ (fp::FADD | fp::FSUB | fp::FMUL | fp::FDIV) => {
                let Some(rm) = self.rounding(d.funct3) else {
                    return Err(illegal);
                };
                let op = match funct5 {
                    fp::FADD => FpOp::Add,
                    fp::FSUB => FpOp::Sub,
                    fp::FMUL => FpOp::Mul,
                    _ => FpOp::Div,
                };
                let (value, flags) = Fpu::execute(op, prec, a, b, 0, rm);
                self.commit_f(d.rd, value, flags);
            }
            fp::FSQRT => {
                let (0, Some(rm)) = (d.rs2, self.rounding(d.funct3)) else {
                    return Err(illegal);
                };
                let (value, flags) = Fpu::execute(FpOp::Sqrt, prec, a, 0, 0, rm);
                self.commit_f(d.rd, value, flags);
            }
            fp::FSGNJ => {
                let op = match d.funct3 {
                    fp::SGNJ => FpOp::SgnJ,
                    fp::SGNJN => FpOp::SgnJN,
                    fp::SGNJX => FpOp::SgnJX,
                    _ => return Err(illegal),
                };
                let (value, flags) = Fpu::execute(op, prec, a, b, 0, RoundingMode::Rne);
                self.commit_f(d.rd, value, flags);
            }
            fp::FMIN_MAX => {
                let op = match d.funct3 {
                    fp::MIN => FpOp::Min,
                    fp::MAX => FpOp::Max,
                    _ => return Err(illegal),
                };
                let (value, flags) = Fpu::execute(op, prec, a, b, 0, RoundingMode::Rne);
                self.commit_f(d.rd, value, flags);
            }
            fp::FCVT_FP_FP => {
                // fmt names the destination; rs2 names the source format.
                let source = match prec {
                    Precision::Single => fp::FMT_D as usize,
                    Precision::Double => fp::FMT_S as usize,
                };
                let (true, true, Some(rm)) = (self.isa.d, d.rs2 == source, self.rounding(d.funct3))
                else {
                    return Err(illegal);
                };
                let (value, flags) = Fpu::convert(prec, a, rm);
                self.commit_f(d.rd, value, flags);
            }
            fp::FCMP => {
                let op = match d.funct3 {
                    fp::EQ => FpOp::Eq,
                    fp::LT => FpOp::Lt,
                    fp::LE => FpOp::Le,
                    _ => return Err(illegal),
                };
                let (value, flags) = Fpu::execute(op, prec, a, b, 0, RoundingMode::Rne);
                self.commit_x(d.rd, value, flags);
            }
            fp::FCVT_INT_FP => {
                let (Some(kind), Some(rm)) = (int_kind(d.rs2), self.rounding(d.funct3)) else {
                    return Err(illegal);
                };
                let (value, flags) = Fpu::to_int(prec, a, kind, rm);
                self.commit_x(d.rd, value, flags);
            }
            fp::FCVT_FP_INT => {
                let (Some(kind), Some(rm)) = (int_kind(d.rs2), self.rounding(d.funct3)) else {
                    return Err(illegal);
                };
                let (value, flags) = Fpu::from_int(prec, self.regs.read(d.rs1), kind, rm);
                self.commit_f(d.rd, value, flags);
            }
            fp::FMV_X_F if d.rs2 == 0 => {
                let value = match (d.funct3, prec) {
                    (fp::MV, Precision::Single) => a as u32 as i32 as i64 as u64,
                    (fp::MV, Precision::Double) => a,
                    (fp::CLASS, _) => Fpu::classify(prec, a),
                    _ => return Err(illegal),
                };
                self.commit_x(d.rd, value, FpFlags::NONE);
            }
            fp::FMV_F_X if d.rs2 == 0 && d.funct3 == 0 => {
                let x = self.regs.read(d.rs1);
                let value = match prec {
                    Precision::Single => box_f32(x as u32),
                    Precision::Double => x,
                };
                self.commit_f(d.rd, value, FpFlags::NONE);
            }
            _ => return Err(illegal),
        }
        Ok(())
    }
}

/// Integer format selected by the `rs2` field of a conversion.
const fn int_kind(rs2: usize) -> Option<IntKind> {
    match rs2 {
        fp::CVT_W => Some(IntKind::W),
        fp::CVT_WU => Some(IntKind::WU),
        fp::CVT_L => Some(IntKind::L),
        fp::CVT_LU => Some(IntKind::LU),
        _ => None,
    }
}
