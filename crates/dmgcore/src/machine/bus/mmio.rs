use crate::error::Error;
use crate::machine::timer;

use super::SystemBus;

pub(super) const P1: u16 = 0xFF00;
pub(super) const SB: u16 = 0xFF01;
pub(super) const SC: u16 = 0xFF02;
pub(super) const IF: u16 = 0xFF0F;
pub(super) const LCDC: u16 = 0xFF40;
pub(super) const STAT: u16 = 0xFF41;
pub(super) const SCY: u16 = 0xFF42;
pub(super) const SCX: u16 = 0xFF43;
pub(super) const LY: u16 = 0xFF44;
pub(super) const LYC: u16 = 0xFF45;
pub(super) const DMA: u16 = 0xFF46;
pub(super) const BGP: u16 = 0xFF47;
pub(super) const WX: u16 = 0xFF4B;

/// Registers the bus answers itself; they cannot be handed to an
/// `IoHandler`.
pub(super) fn is_builtin(addr: u16) -> bool {
    matches!(
        addr,
        P1 | SB | SC | timer::DIV..=timer::TAC | IF | STAT | LY | LYC | DMA
    )
}

impl SystemBus {
    pub(super) fn read8_mmio(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xA000..=0xBFFF => self.cartridge.ram_read(addr),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            // Echo RAM mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            0xFEA0..=0xFEFF => {
                Error::UnusableRegion { addr }.report(self.strict_io_logging);
                0
            }
            0xFF00..=0xFF7F => self.read_io(addr),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupts.enable_mask(),
        }
    }

    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xA000..=0xBFFF => self.cartridge.ram_write(addr, value),
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            0xFEA0..=0xFEFF => Error::UnusableRegion { addr }.report(self.strict_io_logging),
            0xFF00..=0xFF7F => self.write_io(addr, value),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupts.set_enable_mask(value),
        }
    }

    fn read_io(&mut self, addr: u16) -> u8 {
        match addr {
            P1 => self.joypad.read(),
            SB => self.serial.sb,
            SC => self.serial.read_sc(),
            timer::DIV..=timer::TAC => self.timer.read(addr),
            IF => self.interrupts.request_mask(),
            STAT => self.timing.read_stat(),
            LY => self.timing.current_line(),
            LYC => self.timing.lyc(),
            DMA => self.dma_source,
            _ => match self.io_map[(addr - 0xFF00) as usize] {
                Some(index) => self.io_handlers[index].read(addr),
                None => {
                    Error::UnmappedIo { addr }.report(self.strict_io_logging);
                    0
                }
            },
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            P1 => self.joypad.write(value),
            SB => self.serial.write_sb(value),
            SC => self.serial.write_sc(value, &mut self.interrupts),
            timer::DIV..=timer::TAC => self.timer.write(addr, value, &mut self.interrupts),
            IF => self.interrupts.set_request_mask(value),
            STAT => self.timing.write_stat(value),
            // LY is read-only.
            LY => {}
            LYC => self.timing.set_lyc(value),
            DMA => self.do_oam_dma(value),
            _ => match self.io_map[(addr - 0xFF00) as usize] {
                Some(index) => self.io_handlers[index].write(addr, value),
                None => Error::UnmappedIo { addr }.report(self.strict_io_logging),
            },
        }
    }
}
