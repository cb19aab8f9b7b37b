//! Integer register file, XLEN = 64.

/// `x0..x31`. Slot 0 is never written, so `x0` always reads zero.
#[derive(Clone, Debug, Default)]
pub struct Gpr {
    regs: [u64; 32],
}

impl Gpr {
    /// All registers zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `x{idx}`. Only the low five bits of `idx` are used.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        self.regs[idx & 0x1F]
    }

    /// Sets `x{idx}` unless it is `x0`.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        let idx = idx & 0x1F;
        if idx != 0 {
            self.regs[idx] = val;
        }
    }
}
