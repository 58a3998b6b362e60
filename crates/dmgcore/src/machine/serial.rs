use crate::interrupts::{Interrupt, InterruptController};

/// Serial port modelled via SB/SC.
///
/// Only the internal-clock transfer that test programs use to report
/// results is modelled. Setting SC bits 7 and 0 completes the transfer at
/// once: the current SB value is appended to `output`, SB reads back 0xFF
/// as if nothing was connected, and the serial interrupt is raised.
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            sb: 0x00,
            sc: 0x7E,
            output: Vec::new(),
        }
    }
}

impl Serial {
    pub(crate) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(crate) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    pub(crate) fn write_sc(&mut self, value: u8, interrupts: &mut InterruptController) {
        self.sc = value;
        if (self.sc & 0x81) == 0x81 {
            self.output.push(self.sb);
            self.sc &= !0x80;
            self.sb = 0xFF;
            interrupts.raise(Interrupt::Serial);
        }
    }
}
