//! Control and Status Register (CSR) definitions and operations.
//!
//! This module implements the machine-mode CSR subsystem of the hart. It provides:
//! 1. **Address Definitions:** Constants for the machine, floating-point, and counter CSRs.
//! 2. **Field Masks:** Bitmasks for `mstatus` and `misa`.
//! 3. **Register Storage:** The `Csrs` struct holding architectural state.
//! 4. **Access Logic:** Checked reads and writes; unknown or read-only addresses are refused
//!    so the caller can raise an illegal-instruction trap.

/// Floating-point accrued exception flags CSR address.
pub const FFLAGS: u32 = 0x001;
/// Floating-point dynamic rounding mode CSR address.
pub const FRM: u32 = 0x002;
/// Floating-point control and status CSR address (`frm` and `fflags` combined).
pub const FCSR: u32 = 0x003;

/// Machine vendor ID CSR address.
pub const MVENDORID: u32 = 0xF11;
/// Machine architecture ID CSR address.
pub const MARCHID: u32 = 0xF12;
/// Machine implementation ID CSR address.
pub const MIMPID: u32 = 0xF13;
/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;
/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;
/// Machine exception delegation register CSR address.
pub const MEDELEG: u32 = 0x302;
/// Machine interrupt delegation register CSR address.
pub const MIDELEG: u32 = 0x303;
/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;
/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;
/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;
/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;
/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;
/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;
/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Cycle counter CSR address (read-only shadow of `mcycle`).
pub const CYCLE: u32 = 0xC00;
/// Real-time counter CSR address (read-only, tracks `mcycle`).
pub const TIME: u32 = 0xC01;
/// Instructions retired counter CSR address (read-only shadow of `minstret`).
pub const INSTRET: u32 = 0xC02;
/// Machine cycle counter CSR address.
pub const MCYCLE: u32 = 0xB00;
/// Machine instructions retired counter CSR address.
pub const MINSTRET: u32 = 0xB02;

/// Machine interrupt enable bit in `mstatus` register.
pub const MSTATUS_MIE: u64 = 1 << 3;
/// Machine previous interrupt enable bit in `mstatus` register.
pub const MSTATUS_MPIE: u64 = 1 << 7;
/// Machine previous privilege mode field mask in `mstatus` register.
pub const MSTATUS_MPP: u64 = 3 << 11;
/// Floating-point state field mask in `mstatus` register.
pub const MSTATUS_FS: u64 = 3 << 13;
/// Floating-point state: initial.
pub const MSTATUS_FS_INIT: u64 = 1 << 13;
/// Floating-point state: dirty (FPU state has been modified).
pub const MSTATUS_FS_DIRTY: u64 = 3 << 13;
/// State-dirty summary bit of `mstatus` on RV64.
pub const MSTATUS_SD: u64 = 1 << 63;
/// Default `mstatus` value for RV64 (UXL = SXL = 64-bit, MPP = M).
pub const MSTATUS_DEFAULT_RV64: u64 = 0xa_0000_0000 | MSTATUS_MPP;
/// Bits of `mstatus` software may change; MPP is hardwired to M.
const MSTATUS_WRITABLE: u64 = MSTATUS_MIE | MSTATUS_MPIE | MSTATUS_FS;

/// MISA extension bit for atomic operations (A extension).
pub const MISA_EXT_A: u64 = 1 << 0;
/// MISA extension bit for compressed instructions (C extension).
pub const MISA_EXT_C: u64 = 1 << 2;
/// MISA extension bit for double-precision floating-point (D extension).
pub const MISA_EXT_D: u64 = 1 << 3;
/// MISA extension bit for single-precision floating-point (F extension).
pub const MISA_EXT_F: u64 = 1 << 5;
/// MISA extension bit for base integer instructions (I extension).
pub const MISA_EXT_I: u64 = 1 << 8;
/// MISA extension bit for integer multiply/divide (M extension).
pub const MISA_EXT_M: u64 = 1 << 12;
/// MISA XLEN field value for 64-bit architecture.
pub const MISA_XLEN_64: u64 = 2 << 62;

/// Mask of the five accrued exception flag bits.
const FFLAGS_MASK: u64 = 0x1F;
/// Mask of the three rounding mode bits.
const FRM_MASK: u64 = 0x7;

/// Control and Status Register file.
#[derive(Clone, Debug, Default)]
pub struct Csrs {
    /// Machine status register.
    pub mstatus: u64,
    /// Machine ISA register.
    pub misa: u64,
    /// Machine exception delegation.
    pub medeleg: u64,
    /// Machine interrupt delegation.
    pub mideleg: u64,
    /// Machine interrupt enable.
    pub mie: u64,
    /// Machine trap vector base address (direct mode only).
    pub mtvec: u64,
    /// Machine scratch register.
    pub mscratch: u64,
    /// Machine exception program counter.
    pub mepc: u64,
    /// Machine trap cause.
    pub mcause: u64,
    /// Machine trap value.
    pub mtval: u64,
    /// Machine interrupt pending.
    pub mip: u64,
    /// Accrued floating-point exception flags.
    pub fflags: u64,
    /// Dynamic floating-point rounding mode.
    pub frm: u64,
    /// Machine cycle counter.
    pub mcycle: u64,
    /// Machine instructions retired counter.
    pub minstret: u64,
}

impl Csrs {
    /// Creates the reset CSR state for a hart with the given `misa` and trap vector.
    pub fn new(misa: u64, trap_vector: u64) -> Self {
        let fs = if misa & MISA_EXT_F != 0 {
            MSTATUS_FS_INIT
        } else {
            0
        };
        Self {
            mstatus: MSTATUS_DEFAULT_RV64 | fs,
            misa,
            mtvec: trap_vector & !3,
            ..Self::default()
        }
    }

    /// Returns `true` when the F extension (and therefore the FP CSRs) is present.
    #[inline]
    const fn has_fp(&self) -> bool {
        self.misa & MISA_EXT_F != 0
    }

    /// Returns `true` when `mepc` must stay 2-byte rather than 4-byte aligned.
    #[inline]
    const fn has_compressed(&self) -> bool {
        self.misa & MISA_EXT_C != 0
    }

    /// Reads a CSR value by its address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The CSR value, or `None` if the address names no implemented CSR.
    pub fn read(&self, addr: u32) -> Option<u64> {
        let value = match addr {
            FFLAGS if self.has_fp() => self.fflags,
            FRM if self.has_fp() => self.frm,
            FCSR if self.has_fp() => (self.frm << 5) | self.fflags,
            MVENDORID | MARCHID | MIMPID | MHARTID => 0,
            MSTATUS => {
                if self.mstatus & MSTATUS_FS == MSTATUS_FS_DIRTY {
                    self.mstatus | MSTATUS_SD
                } else {
                    self.mstatus
                }
            }
            MISA => self.misa,
            MEDELEG => self.medeleg,
            MIDELEG => self.mideleg,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => {
                if self.has_compressed() {
                    self.mepc
                } else {
                    self.mepc & !3
                }
            }
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            MIP => self.mip,
            MCYCLE | CYCLE | TIME => self.mcycle,
            MINSTRET | INSTRET => self.minstret,
            _ => return None,
        };
        Some(value)
    }

    /// Writes a value to a CSR by its address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val` - The 64-bit value to write.
    ///
    /// # Returns
    ///
    /// `false` if the CSR does not exist or is read-only; the state is unchanged in that case.
    pub fn write(&mut self, addr: u32, val: u64) -> bool {
        // Address bits [11:10] == 0b11 mark the read-only CSR space.
        if (addr >> 10) & 0b11 == 0b11 {
            return false;
        }
        match addr {
            FFLAGS if self.has_fp() => {
                self.fflags = val & FFLAGS_MASK;
                self.mark_fp_dirty();
            }
            FRM if self.has_fp() => {
                self.frm = val & FRM_MASK;
                self.mark_fp_dirty();
            }
            FCSR if self.has_fp() => {
                self.fflags = val & FFLAGS_MASK;
                self.frm = (val >> 5) & FRM_MASK;
                self.mark_fp_dirty();
            }
            MSTATUS => {
                self.mstatus = (self.mstatus & !MSTATUS_WRITABLE) | (val & MSTATUS_WRITABLE);
            }
            // misa is WARL and the extension set is fixed at construction.
            MISA => {}
            MEDELEG => self.medeleg = val,
            MIDELEG => self.mideleg = val,
            MIE => self.mie = val,
            MTVEC => self.mtvec = val & !3,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val & !1,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            MIP => self.mip = val,
            MCYCLE => self.mcycle = val,
            MINSTRET => self.minstret = val,
            _ => return false,
        }
        true
    }

    /// Records that floating-point state changed.
    #[inline]
    pub fn mark_fp_dirty(&mut self) {
        self.mstatus |= MSTATUS_FS_DIRTY;
    }

    /// ORs newly raised exception flags into `fflags`.
    #[inline]
    pub fn accrue_fflags(&mut self, flags: u64) {
        if flags != 0 {
            self.fflags |= flags & FFLAGS_MASK;
        }
    }
}
