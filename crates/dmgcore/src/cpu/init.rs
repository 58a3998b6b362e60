use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU in the state the boot ROM leaves it in, PC=0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::zeroed();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// CPU with every register cleared, PC=0x0000.
    pub fn zeroed() -> Self {
        Self {
            regs: Registers::default(),
            halted: false,
            fault: None,
        }
    }

    /// Return to power-on state, dropping any latched fault.
    pub fn reset(&mut self, post_boot: bool) {
        *self = if post_boot { Self::new() } else { Self::zeroed() };
    }

    /// Registers as the DMG boot ROM hands them to cartridge code.
    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.bc.set(0x0013);
        self.regs.de.set(0x00D8);
        self.regs.hl.set(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }
}
