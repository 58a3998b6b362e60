use crate::cpu::{Bus, Cpu};
use crate::opcodes::Op;

impl Cpu {
    pub(super) fn exec_system<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Di => bus.interrupts().disable(),
            // IME becomes 1 after the *next* instruction completes.
            Op::Ei => bus.interrupts().request_enable(),
            // Only interrupt service leaves this state.
            Op::Halt => self.halted = true,
            // STOP is a two-byte no-op; there is no low-power mode.
            Op::Stop => log::debug!("STOP at PC=0x{:04X} treated as NOP", self.regs.pc),
            _ => unreachable!(),
        }
    }
}
