use crate::cpu::{Bus, Cpu};
use crate::opcodes::{Op, OpcodeDescriptor, Operand};

impl Cpu {
    pub(super) fn exec_push_pop<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) {
        let Some(Operand::Pair(pair)) = desc.target() else {
            return;
        };
        if desc.op == Op::Push {
            let value = self.regs.get16(pair);
            self.push_u16(bus, value);
        } else {
            // POP AF drops the low nibble of F through `set16`.
            let value = self.pop_u16(bus);
            self.regs.set16(pair, value);
        }
    }

    /// CALL a16 / CALL cc,a16. The return address is the instruction that
    /// follows the call.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) -> Option<u16> {
        if !self.condition_holds(desc.condition()) {
            return None;
        }
        let addr = self.imm16(bus);
        let ret = self.regs.pc.wrapping_add(desc.length as u16);
        self.push_u16(bus, ret);
        Some(addr)
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) -> Option<u16> {
        if !self.condition_holds(desc.condition()) {
            return None;
        }
        Some(self.pop_u16(bus))
    }

    /// RETI: return, and master-enable on without the `EI` delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let addr = self.pop_u16(bus);
        bus.interrupts().return_from_interrupt();
        addr
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) -> u16 {
        let vector = match desc.target() {
            Some(Operand::Vector(vector)) => vector as u16,
            _ => desc.value as u16 & 0x38,
        };
        let ret = self.regs.pc.wrapping_add(desc.length as u16);
        self.push_u16(bus, ret);
        vector
    }
}
