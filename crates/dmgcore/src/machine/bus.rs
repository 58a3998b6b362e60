use crate::interrupts::InterruptController;

use super::{
    cartridge::{Cartridge, CartridgeHeader},
    serial::Serial,
    timer::Timer,
    timing::VideoTiming,
};

mod dma;
mod init;
mod io;
mod joypad;
mod mmio;
mod traits;

pub use io::{IoHandler, LatchBank};
pub use joypad::Button;

use joypad::Joypad;

const VRAM_SIZE: usize = 0x2000;
const WRAM_SIZE: usize = 0x2000;
const OAM_SIZE: usize = 0xA0;
const HRAM_SIZE: usize = 0x7F;
const IO_SIZE: usize = 0x80;

/// Address-decoded system bus.
///
/// Owns every backing store and peripheral the CPU can reach, including
/// the interrupt controller, so one `&mut SystemBus` is all a CPU step
/// needs.
pub(crate) struct SystemBus {
    vram: [u8; VRAM_SIZE],
    wram: [u8; WRAM_SIZE],
    oam: [u8; OAM_SIZE],
    hram: [u8; HRAM_SIZE],
    cartridge: Cartridge,
    header: Option<CartridgeHeader>,
    pub(crate) interrupts: InterruptController,
    pub(crate) timing: VideoTiming,
    timer: Timer,
    pub(crate) serial: Serial,
    joypad: Joypad,
    /// Last value written to DMA (0xFF46).
    dma_source: u8,
    /// Handler index per I/O address (0xFF00..=0xFF7F).
    io_map: [Option<usize>; IO_SIZE],
    io_handlers: Vec<Box<dyn IoHandler>>,
    /// Log unmapped and unusable accesses at warn instead of debug.
    strict_io_logging: bool,
}

impl SystemBus {
    pub(crate) fn new(strict_io_logging: bool) -> Self {
        let mut bus = Self {
            vram: [0; VRAM_SIZE],
            wram: [0; WRAM_SIZE],
            oam: [0; OAM_SIZE],
            hram: [0; HRAM_SIZE],
            cartridge: Cartridge::empty(),
            header: None,
            interrupts: InterruptController::new(),
            timing: VideoTiming::new(),
            timer: Timer::new(),
            serial: Serial::default(),
            joypad: Joypad::default(),
            dma_source: 0,
            io_map: [None; IO_SIZE],
            io_handlers: Vec::new(),
            strict_io_logging,
        };
        bus.install_register_latches();
        bus
    }

    /// Swap in a new cartridge. The rest of the machine is left alone;
    /// callers reset it separately.
    pub(super) fn insert_cartridge(&mut self, cartridge: Cartridge, header: CartridgeHeader) {
        self.cartridge = cartridge;
        self.header = Some(header);
    }

    pub(crate) fn header(&self) -> Option<&CartridgeHeader> {
        self.header.as_ref()
    }

    pub(crate) fn rom_bank(&self) -> u16 {
        self.cartridge.rom_bank()
    }

    /// Advance the cycle-driven peripherals: video timing and the timer.
    pub(crate) fn tick(&mut self, cycles: u32) {
        self.timing.advance(cycles, &mut self.interrupts);
        self.timer.advance(cycles, &mut self.interrupts);
    }

    pub(crate) fn set_button(&mut self, button: Button, pressed: bool) {
        self.joypad.set_button(button, pressed, &mut self.interrupts);
    }

    /// Attach `handler` to `addrs` in the I/O range.
    ///
    /// Returns false, leaving the map untouched, when any address falls
    /// outside 0xFF00..=0xFF7F or belongs to a register the bus models
    /// itself.
    pub(crate) fn register_io_handler(
        &mut self,
        addrs: std::ops::RangeInclusive<u16>,
        handler: Box<dyn IoHandler>,
    ) -> bool {
        if addrs.is_empty() {
            return false;
        }
        let taken = |addr: &u16| !(0xFF00..=0xFF7F).contains(addr) || mmio::is_builtin(*addr);
        if let Some(addr) = addrs.clone().find(taken) {
            log::warn!("cannot attach an I/O handler at 0x{addr:04X}: not a free I/O register");
            return false;
        }

        let index = self.io_handlers.len();
        self.io_handlers.push(handler);
        for addr in addrs {
            self.io_map[(addr - 0xFF00) as usize] = Some(index);
        }
        true
    }
}
