use super::{Bus, Cpu};

impl Cpu {
    /// Service the highest-priority pending interrupt, if master-enable
    /// allows it.
    ///
    /// The current PC is pushed, PC moves to the source's vector and the
    /// halt state is cleared. Returns the vector that was entered.
    pub fn poll_and_service<B: Bus>(&mut self, bus: &mut B) -> Option<u16> {
        let source = bus.interrupts().take_pending()?;

        self.halted = false;
        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = source.vector();

        log::debug!(
            "interrupt {:?}: vector=0x{:04X} return=0x{:04X} sp=0x{:04X}",
            source,
            self.regs.pc,
            pc,
            self.regs.sp,
        );
        Some(self.regs.pc)
    }
}
