use crate::cpu::{Bus, Cpu};
use crate::opcodes::{OpcodeDescriptor, Operand};

impl Cpu {
    /// JR / JR cc. The displacement is relative to the address following
    /// the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) -> Option<u16> {
        if !self.condition_holds(desc.condition()) {
            return None;
        }
        let offset = self.imm8(bus) as i8;
        let next = self.regs.pc.wrapping_add(desc.length as u16);
        Some(next.wrapping_add_signed(offset as i16))
    }

    /// JP a16 / JP cc,a16 / JP HL.
    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) -> Option<u16> {
        if !self.condition_holds(desc.condition()) {
            return None;
        }
        match desc.target() {
            Some(operand @ (Operand::Imm16 | Operand::Pair(_))) => {
                Some(self.read_operand16(bus, operand))
            }
            _ => None,
        }
    }
}
