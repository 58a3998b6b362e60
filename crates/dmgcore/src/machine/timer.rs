/// Timer / divider unit (DIV, TIMA, TMA, TAC).
///
/// A hidden 16-bit counter advances once per cycle and DIV exposes its
/// upper byte. TIMA increments on a falling edge of the counter bit that
/// TAC selects, ANDed with the TAC enable bit. Because the input is an
/// edge detector, a DIV reset or TAC change that drops the input from 1
/// to 0 also counts as an increment.
use crate::interrupts::{Interrupt, InterruptController};

pub(crate) const DIV: u16 = 0xFF04;
pub(crate) const TIMA: u16 = 0xFF05;
pub(crate) const TMA: u16 = 0xFF06;
pub(crate) const TAC: u16 = 0xFF07;

/// DIV reads 0xAB once the boot ROM has handed over.
const POST_BOOT_COUNTER: u16 = 0xAB00;

pub(crate) struct Timer {
    internal_counter: u16,
    tima: u8,
    tma: u8,
    /// Lower 3 bits meaningful.
    tac: u8,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self {
            internal_counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
        }
    }

    pub(crate) fn reset(&mut self, post_boot: bool) {
        *self = Self::new();
        if post_boot {
            self.internal_counter = POST_BOOT_COUNTER;
        }
    }

    /// Counter bit feeding TIMA for the current TAC clock select.
    ///
    /// - 00: bit 9 (every 1024 cycles)
    /// - 01: bit 3 (16)
    /// - 10: bit 5 (64)
    /// - 11: bit 7 (256)
    fn input(&self) -> bool {
        let bit = match self.tac & 0x03 {
            0x00 => 9,
            0x01 => 3,
            0x02 => 5,
            _ => 7,
        };
        self.tac & 0x04 != 0 && self.internal_counter & (1 << bit) != 0
    }

    /// Apply a state change and count a falling edge on the timer input.
    fn update(&mut self, interrupts: &mut InterruptController, change: impl FnOnce(&mut Self)) {
        let before = self.input();
        change(self);
        if before && !self.input() {
            self.increment_tima(interrupts);
        }
    }

    fn increment_tima(&mut self, interrupts: &mut InterruptController) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            interrupts.raise(Interrupt::Timer);
        } else {
            self.tima = next;
        }
    }

    pub(crate) fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        for _ in 0..cycles {
            self.update(interrupts, |timer| {
                timer.internal_counter = timer.internal_counter.wrapping_add(1);
            });
        }
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            DIV => (self.internal_counter >> 8) as u8,
            TIMA => self.tima,
            TMA => self.tma,
            TAC => self.tac | 0b1111_1000,
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8, interrupts: &mut InterruptController) {
        match addr {
            DIV => self.update(interrupts, |timer| timer.internal_counter = 0),
            TIMA => self.tima = value,
            TMA => self.tma = value,
            TAC => self.update(interrupts, |timer| timer.tac = value & 0x07),
            _ => {}
        }
    }
}
