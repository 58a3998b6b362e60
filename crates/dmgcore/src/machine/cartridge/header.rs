use crate::error::{Error, Result};

/// First byte past the header.
pub const HEADER_END: usize = 0x0150;

const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
const CHECKSUM_RANGE: std::ops::RangeInclusive<usize> = 0x0134..=0x014C;

/// Cartridge header fields at 0x0100..0x0150.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    /// Four bytes executed at 0x0100, usually `NOP; JP nnnn`.
    pub entry: [u8; 4],
    /// Printable ASCII from the title area, trimmed at the first NUL.
    pub title: String,
    pub cgb_flag: u8,
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    /// 0x00 Japan, 0x01 elsewhere.
    pub destination: u8,
    pub header_checksum: u8,
}

impl CartridgeHeader {
    pub fn parse(image: &[u8]) -> Result<Self> {
        if image.len() < HEADER_END {
            return Err(Error::InvalidImage { len: image.len() });
        }

        let title = image[TITLE]
            .iter()
            .take_while(|&&byte| byte != 0)
            .filter(|byte| byte.is_ascii_graphic() || **byte == b' ')
            .map(|&byte| byte as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        Ok(Self {
            entry: [image[0x100], image[0x101], image[0x102], image[0x103]],
            title,
            cgb_flag: image[0x143],
            sgb_flag: image[0x146],
            cartridge_type: image[0x147],
            rom_size_code: image[0x148],
            ram_size_code: image[0x149],
            destination: image[0x14A],
            header_checksum: image[0x14D],
        })
    }

    /// Header checksum as the boot ROM computes it.
    pub fn compute_checksum(image: &[u8]) -> u8 {
        image
            .get(CHECKSUM_RANGE)
            .unwrap_or_default()
            .iter()
            .fold(0u8, |x, &byte| x.wrapping_sub(byte).wrapping_sub(1))
    }

    /// Whether the bank controller is an MBC1 (types 0x01..=0x03).
    pub fn is_banked(&self) -> bool {
        matches!(self.cartridge_type, 0x01..=0x03)
    }

    /// 16 KiB ROM banks declared by the size code.
    pub fn rom_banks(&self) -> u16 {
        match self.rom_size_code {
            code @ 0x00..=0x08 => 2u16 << code,
            _ => 2,
        }
    }

    /// Cartridge RAM size in bytes declared by the size code.
    pub fn ram_bytes(&self) -> usize {
        match self.ram_size_code {
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x20000,
            0x05 => 0x10000,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_header() -> Vec<u8> {
        let mut image = vec![0u8; 0x8000];
        image[0x100..0x104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
        image[0x134..0x13E].copy_from_slice(b"CPU_INSTRS");
        image[0x147] = 0x01;
        image[0x148] = 0x01;
        image[0x149] = 0x02;
        image[0x14A] = 0x01;
        image[0x14D] = CartridgeHeader::compute_checksum(&image);
        image
    }

    #[test]
    fn parses_fixed_offsets() {
        let image = image_with_header();
        let header = CartridgeHeader::parse(&image).unwrap();
        assert_eq!(header.entry, [0x00, 0xC3, 0x50, 0x01]);
        assert_eq!(header.title, "CPU_INSTRS");
        assert!(header.is_banked());
        assert_eq!(header.rom_banks(), 4);
        assert_eq!(header.ram_bytes(), 0x2000);
        assert_eq!(header.destination, 0x01);
        assert_eq!(header.header_checksum, CartridgeHeader::compute_checksum(&image));
    }

    #[test]
    fn checksum_follows_boot_rom_formula() {
        // With every byte zero the sum is -(25 * 1) mod 256.
        let image = vec![0u8; HEADER_END];
        assert_eq!(CartridgeHeader::compute_checksum(&image), 0xE7);
    }

    #[test]
    fn short_image_is_rejected() {
        assert_eq!(
            CartridgeHeader::parse(&[0u8; 0x14F]),
            Err(Error::InvalidImage { len: 0x14F })
        );
    }

    #[test]
    fn title_drops_non_printable_bytes() {
        let mut image = vec![0u8; HEADER_END];
        image[0x134..0x139].copy_from_slice(b"TE\x01ST");
        let header = CartridgeHeader::parse(&image).unwrap();
        assert_eq!(header.title, "TEST");
        assert!(!header.is_banked());
    }
}
