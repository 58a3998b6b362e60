mod header;
mod mbc1;

pub use header::CartridgeHeader;
pub(super) use mbc1::Mbc1Cartridge;

use crate::error::Result;

/// Cartridge mapper selected from the header's type byte.
pub(super) enum Cartridge {
    /// ROM mapped flat, with optional unbanked RAM.
    Plain { rom: Vec<u8>, ram: Vec<u8> },
    Mbc1(Mbc1Cartridge),
}

impl Cartridge {
    /// Slot with nothing inserted: ROM reads 0xFF, no RAM.
    pub(super) fn empty() -> Self {
        Self::Plain {
            rom: Vec::new(),
            ram: Vec::new(),
        }
    }

    /// Parse the header and build the matching mapper.
    pub(super) fn load(image: &[u8]) -> Result<(Self, CartridgeHeader)> {
        let header = CartridgeHeader::parse(image)?;

        let computed = CartridgeHeader::compute_checksum(image);
        if computed != header.header_checksum {
            log::warn!(
                "header checksum mismatch: stored 0x{:02X}, computed 0x{:02X}",
                header.header_checksum,
                computed
            );
        }

        let ram_bytes = header.ram_bytes();
        let cart = if header.is_banked() {
            Self::Mbc1(Mbc1Cartridge::new(image, ram_bytes))
        } else {
            Self::Plain {
                rom: image.to_vec(),
                ram: vec![0x00; ram_bytes],
            }
        };

        log::info!(
            "loaded \"{}\": type=0x{:02X} rom={} bytes ({} banks declared) ram={} bytes",
            header.title,
            header.cartridge_type,
            image.len(),
            header.rom_banks(),
            ram_bytes
        );
        Ok((cart, header))
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::Plain { rom, .. } => rom.get(addr as usize).copied().unwrap_or(0xFF),
            Cartridge::Mbc1(m) => m.rom_read(addr),
        }
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::Plain { .. } => {
                log::warn!("write of 0x{value:02X} to ROM at 0x{addr:04X} ignored");
            }
            Cartridge::Mbc1(m) => m.rom_write(addr, value),
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::Plain { ram, .. } => {
                if ram.is_empty() {
                    return 0x00;
                }
                ram[(addr as usize - 0xA000) % ram.len()]
            }
            Cartridge::Mbc1(m) => m.ram_read(addr),
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::Plain { ram, .. } => {
                if !ram.is_empty() {
                    let len = ram.len();
                    ram[(addr as usize - 0xA000) % len] = value;
                }
            }
            Cartridge::Mbc1(m) => m.ram_write(addr, value),
        }
    }

    /// Bank currently mapped at 0x4000-0x7FFF.
    pub(super) fn rom_bank(&self) -> u16 {
        match self {
            Cartridge::Plain { .. } => 1,
            Cartridge::Mbc1(m) => m.rom_bank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn image(cart_type: u8, banks: usize) -> Vec<u8> {
        let mut rom = vec![0u8; banks * 0x4000];
        for bank in 0..banks {
            rom[bank * 0x4000 + 0x10] = 0xB0 | bank as u8;
        }
        rom[0x147] = cart_type;
        rom[0x148] = (banks / 2).trailing_zeros() as u8;
        rom[0x14D] = CartridgeHeader::compute_checksum(&rom);
        rom
    }

    #[test]
    fn plain_image_ignores_rom_writes() {
        let (mut cart, header) = Cartridge::load(&image(0x00, 2)).unwrap();
        assert!(!header.is_banked());
        cart.rom_write(0x2000, 0x05);
        assert_eq!(cart.rom_read(0x4010), 0xB1);
        assert_eq!(cart.rom_bank(), 1);
    }

    #[test]
    fn plain_image_without_ram_reads_zero() {
        let (mut cart, _) = Cartridge::load(&image(0x00, 2)).unwrap();
        cart.ram_write(0xA000, 0x77);
        assert_eq!(cart.ram_read(0xA000), 0x00);
    }

    #[test]
    fn banked_image_switches_window() {
        let (mut cart, header) = Cartridge::load(&image(0x01, 8)).unwrap();
        assert_eq!(header.rom_banks(), 8);
        cart.rom_write(0x2000, 0x05);
        assert_eq!(cart.rom_read(0x4010), 0xB5);
        assert_eq!(cart.rom_read(0x0010), 0xB0);
    }

    #[test]
    fn empty_slot_reads_open_bus() {
        let cart = Cartridge::empty();
        assert_eq!(cart.rom_read(0x0100), 0xFF);
        assert_eq!(cart.ram_read(0xA000), 0x00);
    }

    #[test]
    fn short_image_fails_to_load() {
        assert!(matches!(
            Cartridge::load(&[0u8; 0x40]),
            Err(Error::InvalidImage { len: 0x40 })
        ));
    }
}
