use crate::cpu::{Bus, Cpu, Flag, Reg16};
use crate::opcodes::{Op, OpcodeDescriptor, Operand};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) {
        let Some(src) = desc.source() else {
            return;
        };

        // 16-bit forms: ADD HL,rr and ADD SP,e8.
        match desc.target() {
            Some(Operand::Pair(Reg16::HL)) => {
                let value = self.read_operand16(bus, src);
                self.alu_add16_hl(value);
                return;
            }
            Some(Operand::Pair(Reg16::SP)) => {
                let offset = self.imm8(bus);
                self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
                return;
            }
            _ => {}
        }

        let value = self.read_operand8(bus, src);
        match desc.op {
            Op::Add => self.alu_add(value, false),
            Op::Adc => self.alu_add(value, true),
            Op::Sub => self.alu_sub(value, false),
            Op::Sbc => self.alu_sub(value, true),
            Op::And => self.alu_and(value),
            Op::Xor => self.alu_xor(value),
            Op::Or => self.alu_or(value),
            Op::Cp => self.alu_cp(value),
            _ => unreachable!(),
        }
    }

    /// INC/DEC on a register, `(HL)` or a pair. The 16-bit forms touch no
    /// flags.
    pub(super) fn exec_incdec<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) {
        let Some(target) = desc.target() else {
            return;
        };
        let increment = desc.op == Op::Inc;

        if let Operand::Pair(pair) = target {
            let value = self.regs.get16(pair);
            let result = if increment {
                value.wrapping_add(1)
            } else {
                value.wrapping_sub(1)
            };
            self.regs.set16(pair, result);
        } else if increment {
            self.modify_operand8(bus, target, Self::alu_inc8);
        } else {
            self.modify_operand8(bus, target, Self::alu_dec8);
        }
    }

    /// RLCA/RRCA/RLA/RRA: like the extended rotates on A, but Z is always
    /// cleared.
    pub(super) fn exec_rotate_a(&mut self, op: Op) {
        let a = self.regs.a();
        let carry_in = self.regs.flag(Flag::C) as u8;
        let (result, carry_out) = match op {
            Op::Rlca => (a.rotate_left(1), a & 0x80 != 0),
            Op::Rrca => (a.rotate_right(1), a & 0x01 != 0),
            Op::Rla => ((a << 1) | carry_in, a & 0x80 != 0),
            Op::Rra => ((a >> 1) | (carry_in << 7), a & 0x01 != 0),
            _ => unreachable!(),
        };
        self.regs.set_a(result);
        self.regs.set_flags(false, false, false, carry_out);
    }

    pub(super) fn exec_accumulator_misc(&mut self, op: Op) {
        match op {
            Op::Daa => self.alu_daa(),
            Op::Cpl => {
                self.regs.set_a(!self.regs.a());
                self.regs.set_flag(Flag::N, true);
                self.regs.set_flag(Flag::H, true);
            }
            Op::Scf => {
                self.regs.set_flag(Flag::N, false);
                self.regs.set_flag(Flag::H, false);
                self.regs.set_flag(Flag::C, true);
            }
            Op::Ccf => {
                let carry = self.regs.flag(Flag::C);
                self.regs.set_flag(Flag::N, false);
                self.regs.set_flag(Flag::H, false);
                self.regs.set_flag(Flag::C, !carry);
            }
            _ => unreachable!(),
        }
    }
}
