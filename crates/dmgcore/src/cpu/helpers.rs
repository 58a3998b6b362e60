use crate::opcodes::{Cond, Operand};

use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Byte `offset` positions after the opcode at PC.
    ///
    /// PC still points at the opcode while a handler runs, so immediates are
    /// read relative to it.
    #[inline]
    pub(super) fn operand_byte<B: Bus>(&self, bus: &mut B, offset: u16) -> u8 {
        bus.read8(self.regs.pc.wrapping_add(offset))
    }

    #[inline]
    pub(super) fn imm8<B: Bus>(&self, bus: &mut B) -> u8 {
        self.operand_byte(bus, 1)
    }

    #[inline]
    pub(super) fn imm16<B: Bus>(&self, bus: &mut B) -> u16 {
        let lo = self.operand_byte(bus, 1);
        let hi = self.operand_byte(bus, 2);
        u16::from_le_bytes([lo, hi])
    }

    /// Effective address of a memory operand.
    ///
    /// `(HL+)` and `(HL-)` adjust HL as a side effect, so this must be called
    /// exactly once per access.
    pub(super) fn operand_addr<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u16 {
        match operand {
            Operand::Indirect(pair) => self.regs.get16(pair),
            Operand::IndirectInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Operand::IndirectDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
            Operand::Direct => self.imm16(bus),
            Operand::HighImm => 0xFF00 | self.imm8(bus) as u16,
            Operand::HighC => 0xFF00 | self.regs.bc.lo as u16,
            _ => unreachable!("{operand} does not address memory"),
        }
    }

    pub(super) fn read_operand8<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.get8(reg),
            Operand::Imm8 | Operand::Offset => self.imm8(bus),
            _ => {
                let addr = self.operand_addr(bus, operand);
                bus.read8(addr)
            }
        }
    }

    pub(super) fn write_operand8<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.set8(reg, value),
            _ => {
                let addr = self.operand_addr(bus, operand);
                bus.write8(addr, value);
            }
        }
    }

    /// Read-modify-write on an 8-bit operand, touching memory operands once
    /// for the read and once for the write.
    pub(super) fn modify_operand8<B: Bus>(
        &mut self,
        bus: &mut B,
        operand: Operand,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) {
        match operand {
            Operand::Reg(reg) => {
                let value = self.regs.get8(reg);
                let result = f(self, value);
                self.regs.set8(reg, result);
            }
            _ => {
                let addr = self.operand_addr(bus, operand);
                let value = bus.read8(addr);
                let result = f(self, value);
                bus.write8(addr, result);
            }
        }
    }

    pub(super) fn read_operand16<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u16 {
        match operand {
            Operand::Pair(pair) => self.regs.get16(pair),
            Operand::Imm16 => self.imm16(bus),
            Operand::SpOffset => {
                let offset = self.imm8(bus);
                self.alu_add16_signed(self.regs.sp, offset)
            }
            _ => unreachable!("{operand} is not a 16-bit source"),
        }
    }

    pub(super) fn write_operand16<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u16) {
        match operand {
            Operand::Pair(pair) => self.regs.set16(pair, value),
            Operand::Direct => {
                let addr = self.imm16(bus);
                let [lo, hi] = value.to_le_bytes();
                bus.write8(addr, lo);
                bus.write8(addr.wrapping_add(1), hi);
            }
            _ => unreachable!("{operand} is not a 16-bit destination"),
        }
    }

    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        // Stack grows downward: memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn condition_holds(&self, cond: Option<Cond>) -> bool {
        match cond {
            None => true,
            Some(Cond::NZ) => !self.regs.flag(Flag::Z),
            Some(Cond::Z) => self.regs.flag(Flag::Z),
            Some(Cond::NC) => !self.regs.flag(Flag::C),
            Some(Cond::C) => self.regs.flag(Flag::C),
        }
    }
}
