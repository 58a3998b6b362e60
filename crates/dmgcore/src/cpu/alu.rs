use super::{Cpu, Flag};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a();
        let carry_in = (use_carry && self.regs.flag(Flag::C)) as u8;

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.set_a(result);
        self.regs
            .set_flags(result == 0, false, half > 0x0F, full > 0xFF);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.set_a(result);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a();
        let carry_in = (use_carry && self.regs.flag(Flag::C)) as i16;

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.regs.set_flags(result == 0, true, half < 0, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a() & value;
        self.regs.set_a(result);
        self.regs.set_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a() | value;
        self.regs.set_a(result);
        self.regs.set_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a() ^ value;
        self.regs.set_a(result);
        self.regs.set_flags(result == 0, false, false, false);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction value; updates A, Z, H
    /// and C and leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a();
        let mut adjust: u8 = if self.regs.flag(Flag::C) { 0x60 } else { 0x00 };
        if self.regs.flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.regs.flag(Flag::N) {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            // After a subtraction.
            a = a.wrapping_sub(adjust);
        }

        self.regs.set_flag(Flag::C, adjust >= 0x60);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::Z, a == 0);
        self.regs.set_a(a);
    }

    /// INC r / INC (HL). Updates Z, N, H; C is unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL). Updates Z, N, H; C is unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`: Z unaffected, N cleared, H from bit 11, C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.regs.set_flag(Flag::N, false);
        self.regs
            .set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs
            .set_flag(Flag::C, hl as u32 + value as u32 > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit displacement added to a 16-bit base, as used by
    /// `ADD SP,e8` and `LD HL,SP+e8`.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let half = (base & 0x000F) + (offset & 0x000F) > 0x000F;
        let carry = (base & 0x00FF) + (offset & 0x00FF) > 0x00FF;
        self.regs.set_flags(false, false, half, carry);
        base.wrapping_add(offset)
    }

    /// Shared body of the rotate/shift family. Returns the result and sets
    /// Z from it, C from the bit shifted out, N and H cleared.
    pub(super) fn alu_shift(&mut self, value: u8, kind: ShiftKind) -> u8 {
        let carry_in = self.regs.flag(Flag::C) as u8;
        let (result, carry_out) = match kind {
            ShiftKind::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftKind::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftKind::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            ShiftKind::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            ShiftKind::Sla => (value << 1, value & 0x80 != 0),
            ShiftKind::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftKind::Srl => (value >> 1, value & 0x01 != 0),
            ShiftKind::Swap => (value.rotate_left(4), false),
        };
        self.regs.set_flags(result == 0, false, false, carry_out);
        result
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ShiftKind {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Srl,
    Swap,
}
