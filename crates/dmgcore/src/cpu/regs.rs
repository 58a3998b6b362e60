/// Two 8-bit halves that also read and write as one 16-bit value.
///
/// The composite view is `hi:lo` with the pair stored low byte first, so
/// `get()` is `u16::from_le_bytes([lo, hi])`. Every 16-bit register access
/// (loads, stack, pointer addressing) goes through this one rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair {
    pub hi: u8,
    pub lo: u8,
}

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        let [lo, hi] = value.to_le_bytes();
        Self { hi, lo }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        u16::from_le_bytes([self.lo, self.hi])
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.lo = lo;
        self.hi = hi;
    }
}

/// 8-bit register selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg8 {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// 16-bit register selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

const FLAG_MASK: u8 = 0xF0;

/// Register file of the LR35902.
///
/// AF is private so the low nibble of F can never be set; the general
/// pairs are plain data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    af: RegisterPair,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.hi = value;
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.lo
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        // Lower 4 bits of F are always zero.
        self.af.lo = value & FLAG_MASK;
    }

    #[inline]
    pub fn af(&self) -> u16 {
        self.af.get()
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        self.af.set(value);
        self.af.lo &= FLAG_MASK;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc.get()
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de.get()
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl.get()
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl.set(value);
    }

    pub fn get8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.af.hi,
            Reg8::F => self.af.lo,
            Reg8::B => self.bc.hi,
            Reg8::C => self.bc.lo,
            Reg8::D => self.de.hi,
            Reg8::E => self.de.lo,
            Reg8::H => self.hl.hi,
            Reg8::L => self.hl.lo,
        }
    }

    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.af.hi = value,
            Reg8::F => self.set_f(value),
            Reg8::B => self.bc.hi = value,
            Reg8::C => self.bc.lo = value,
            Reg8::D => self.de.hi = value,
            Reg8::E => self.de.lo = value,
            Reg8::H => self.hl.hi = value,
            Reg8::L => self.hl.lo = value,
        }
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af(),
            Reg16::BC => self.bc.get(),
            Reg16::DE => self.de.get(),
            Reg16::HL => self.hl.get(),
            Reg16::SP => self.sp,
        }
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::AF => self.set_af(value),
            Reg16::BC => self.bc.set(value),
            Reg16::DE => self.de.set(value),
            Reg16::HL => self.hl.set(value),
            Reg16::SP => self.sp = value,
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.af.lo & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.af.lo |= 1 << bit;
        } else {
            self.af.lo &= !(1 << bit);
        }
    }

    /// Replace all four flags at once.
    #[inline]
    pub fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.af.lo = ((z as u8) << 7) | ((n as u8) << 6) | ((h as u8) << 5) | ((c as u8) << 4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_composes_high_byte_over_low_byte() {
        let mut pair = RegisterPair::new(0xBEEF);
        assert_eq!(pair.hi, 0xBE);
        assert_eq!(pair.lo, 0xEF);

        pair.lo = 0x01;
        assert_eq!(pair.get(), 0xBE01);

        pair.set(0xFFFF);
        pair.set(pair.get().wrapping_add(1));
        assert_eq!(pair, RegisterPair { hi: 0, lo: 0 });
    }

    #[test]
    fn halves_and_pairs_alias_the_same_storage() {
        let mut regs = Registers::default();
        regs.set16(Reg16::BC, 0x1234);
        assert_eq!(regs.get8(Reg8::B), 0x12);
        assert_eq!(regs.get8(Reg8::C), 0x34);

        regs.set8(Reg8::H, 0xC0);
        regs.set8(Reg8::L, 0xDE);
        assert_eq!(regs.hl(), 0xC0DE);
    }

    #[test]
    fn low_nibble_of_f_is_always_clear() {
        let mut regs = Registers::default();
        regs.set_af(0x12FF);
        assert_eq!(regs.a(), 0x12);
        assert_eq!(regs.f(), 0xF0);

        regs.set8(Reg8::F, 0x0F);
        assert_eq!(regs.f(), 0x00);
    }

    #[test]
    fn flags_live_in_the_high_nibble_of_f() {
        let mut regs = Registers::default();
        regs.set_flag(Flag::Z, true);
        assert_eq!(regs.f(), 0x80);
        regs.set_flag(Flag::C, true);
        assert_eq!(regs.f(), 0x90);
        regs.set_flag(Flag::Z, false);
        assert!(!regs.flag(Flag::Z));
        assert!(regs.flag(Flag::C));

        regs.set_flags(false, true, true, false);
        assert_eq!(regs.f(), 0x60);
    }
}
