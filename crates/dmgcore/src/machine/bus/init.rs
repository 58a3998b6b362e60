use super::{
    io::LatchBank,
    joypad::Joypad,
    mmio::{BGP, LCDC, SCX, SCY, WX},
    Serial, SystemBus,
};
use crate::interrupts::InterruptController;

impl SystemBus {
    /// Latches for the renderer-facing registers: LCDC, SCY/SCX, and
    /// BGP..WX.
    pub(super) fn install_register_latches(&mut self) {
        self.register_io_handler(LCDC..=LCDC, Box::new(LatchBank::new(LCDC, 1)));
        self.register_io_handler(SCY..=SCX, Box::new(LatchBank::new(SCY, 2)));
        self.register_io_handler(BGP..=WX, Box::new(LatchBank::new(BGP, (WX - BGP + 1) as usize)));
    }

    /// Return every store and peripheral to power-on state.
    ///
    /// With `post_boot` the I/O registers hold what the boot ROM leaves
    /// behind at PC=0x0100; otherwise they are zero. The cartridge keeps
    /// its image, and attached I/O handlers stay attached and receive
    /// the initial register writes.
    pub(crate) fn reset(&mut self, post_boot: bool) {
        self.vram.fill(0);
        self.wram.fill(0);
        self.oam.fill(0);
        self.hram.fill(0);

        self.interrupts = InterruptController::new();
        self.timing.reset();
        self.timer.reset(post_boot);
        self.serial = Serial::default();
        self.joypad = Joypad::default();

        for addr in [LCDC, SCY, SCX, BGP, BGP + 1, BGP + 2, WX - 1, WX] {
            self.write8_mmio(addr, 0x00);
        }

        if post_boot {
            // P1 with both groups selected reads 0xCF.
            self.joypad.write(0x00);
            // VBlank is already requested when the boot ROM hands over.
            self.interrupts.set_request_mask(0x01);
            self.dma_source = 0xFF;
            self.write8_mmio(LCDC, 0x91);
            self.write8_mmio(BGP, 0xFC);
        } else {
            self.dma_source = 0x00;
        }
    }
}
