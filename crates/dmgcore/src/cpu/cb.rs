use crate::opcodes::{Op, OpcodeDescriptor, Operand};

use super::alu::ShiftKind;
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute an instruction from the extended (`0xCB`) table: rotates,
    /// shifts, `SWAP`, and `BIT`/`RES`/`SET` on a register or `(HL)`.
    pub(super) fn exec_extended<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) {
        let Some(target) = desc.source() else {
            return;
        };
        let bit = match desc.operands[0] {
            Some(Operand::Bit(bit)) => bit,
            _ => 0,
        };

        match desc.op {
            Op::Bit => {
                let value = self.read_operand8(bus, target);
                // Preserve C, set H=1, N=0.
                self.regs.set_flag(Flag::Z, value & (1 << bit) == 0);
                self.regs.set_flag(Flag::N, false);
                self.regs.set_flag(Flag::H, true);
            }
            Op::Res => self.modify_operand8(bus, target, |_, value| value & !(1 << bit)),
            Op::Set => self.modify_operand8(bus, target, |_, value| value | (1 << bit)),
            op => {
                let kind = match op {
                    Op::Rlc => ShiftKind::Rlc,
                    Op::Rrc => ShiftKind::Rrc,
                    Op::Rl => ShiftKind::Rl,
                    Op::Rr => ShiftKind::Rr,
                    Op::Sla => ShiftKind::Sla,
                    Op::Sra => ShiftKind::Sra,
                    Op::Swap => ShiftKind::Swap,
                    Op::Srl => ShiftKind::Srl,
                    _ => unreachable!("{op:?} is not an extended operation"),
                };
                self.modify_operand8(bus, target, |cpu, value| cpu.alu_shift(value, kind));
            }
        }
    }
}
