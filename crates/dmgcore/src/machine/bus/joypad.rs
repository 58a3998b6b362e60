use crate::interrupts::{Interrupt, InterruptController};

/// Joypad keys. The two groups of four share P1's low nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// Whether the key sits in the d-pad group (selected by P1 bit 4).
    fn is_dpad(self) -> bool {
        matches!(self, Button::Right | Button::Left | Button::Up | Button::Down)
    }

    /// Bit within its group's nibble.
    fn bit(self) -> u8 {
        match self {
            Button::Right | Button::A => 0,
            Button::Left | Button::B => 1,
            Button::Up | Button::Select => 2,
            Button::Down | Button::Start => 3,
        }
    }
}

/// P1 selection bits and key state.
///
/// Key masks use bit = 1 for pressed:
/// - buttons: bit0=A, bit1=B, bit2=Select, bit3=Start
/// - dpad:    bit0=Right, bit1=Left, bit2=Up, bit3=Down
pub(super) struct Joypad {
    select: u8,
    buttons: u8,
    dpad: u8,
}

impl Default for Joypad {
    fn default() -> Self {
        Self {
            // No group selected.
            select: 0x30,
            buttons: 0x00,
            dpad: 0x00,
        }
    }
}

impl Joypad {
    pub(super) fn read(&self) -> u8 {
        // Bits 7-6 always read as 1.
        let select = self.select & 0x30;
        // Pressed keys read as 0; a group only shows when its select bit is 0.
        let mut low = 0x0F;
        if (select & 0x10) == 0 {
            low &= !self.dpad & 0x0F;
        }
        if (select & 0x20) == 0 {
            low &= !self.buttons & 0x0F;
        }
        0xC0 | select | low
    }

    pub(super) fn write(&mut self, value: u8) {
        // Only bits 5 and 4 are writable.
        self.select = value & 0x30;
    }

    pub(super) fn set_button(
        &mut self,
        button: Button,
        pressed: bool,
        interrupts: &mut InterruptController,
    ) {
        let mask = 1u8 << button.bit();
        let group = if button.is_dpad() {
            &mut self.dpad
        } else {
            &mut self.buttons
        };
        if pressed {
            if *group & mask == 0 {
                interrupts.raise(Interrupt::Joypad);
            }
            *group |= mask;
        } else {
            *group &= !mask;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_group_reads_pressed_keys_as_zero() {
        let mut pad = Joypad::default();
        let mut ic = InterruptController::new();
        pad.set_button(Button::Start, true, &mut ic);
        pad.set_button(Button::Left, true, &mut ic);

        assert_eq!(pad.read(), 0xFF);
        pad.write(0x10);
        assert_eq!(pad.read(), 0xD0 | 0x07);
        pad.write(0x20);
        assert_eq!(pad.read(), 0xE0 | 0x0D);
    }

    #[test]
    fn only_a_new_press_raises_the_interrupt() {
        let mut pad = Joypad::default();
        let mut ic = InterruptController::new();
        pad.set_button(Button::A, true, &mut ic);
        assert_eq!(ic.request_mask(), 0x10);

        ic.set_request_mask(0);
        pad.set_button(Button::A, true, &mut ic);
        pad.set_button(Button::A, false, &mut ic);
        assert_eq!(ic.request_mask(), 0);
    }
}
