use crate::error::Error;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// MBC1 bank controller state.
///
/// The switchable window at 0x4000-0x7FFF takes its bank from the 5-bit
/// low register with the 2-bit upper register as bits 5-6, in either mode.
/// Mode 1 additionally applies the upper register to the 0x0000-0x3FFF
/// window (banks 0x00/0x20/0x40/0x60) and to external RAM banking.
/// Battery persistence is not modelled.
pub(in super::super) struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    num_rom_banks: u16,
    rom_bank_low5: u8,
    upper2: u8,
    ram_enable: bool,
    banking_mode: u8,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: &[u8], ram_bytes: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0x00; ram_bytes],
            num_rom_banks: (rom.len() / ROM_BANK_SIZE).max(1) as u16,
            rom_bank_low5: 1,
            upper2: 0,
            ram_enable: false,
            banking_mode: 0,
        }
    }

    /// Bank index as the registers select it, before wrapping.
    fn selected_rom_bank(&self) -> u16 {
        let mut bank = (self.rom_bank_low5 & 0x1F) as u16;
        if bank == 0 {
            bank = 1;
        }
        bank | self.upper_bank_bits()
    }

    fn upper_bank_bits(&self) -> u16 {
        ((self.upper2 & 0x03) as u16) << 5
    }

    /// Bank mapped into 0x0000-0x3FFF.
    pub(super) fn low_rom_bank(&self) -> u16 {
        if self.banking_mode == 1 {
            self.upper_bank_bits() % self.num_rom_banks
        } else {
            0
        }
    }

    /// Bank mapped into 0x4000-0x7FFF.
    pub(super) fn rom_bank(&self) -> u16 {
        self.selected_rom_bank() % self.num_rom_banks
    }

    fn ram_bank(&self) -> usize {
        if self.banking_mode == 1 {
            (self.upper2 & 0x03) as usize
        } else {
            0
        }
    }

    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            self.low_rom_bank()
        } else {
            self.rom_bank()
        };
        let offset = (addr as usize) & (ROM_BANK_SIZE - 1);
        let index = (bank as usize)
            .saturating_mul(ROM_BANK_SIZE)
            .saturating_add(offset);
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                self.rom_bank_low5 = value & 0x1F;
                if self.rom_bank_low5 == 0 {
                    self.rom_bank_low5 = 1;
                }
                self.note_bank_switch();
            }
            0x4000..=0x5FFF => {
                self.upper2 = value & 0x03;
                self.note_bank_switch();
            }
            0x6000..=0x7FFF => {
                self.banking_mode = value & 0x01;
                self.note_bank_switch();
            }
            _ => {}
        }
    }

    fn note_bank_switch(&self) {
        let bank = self.selected_rom_bank();
        if bank >= self.num_rom_banks {
            Error::BankOverflow {
                bank,
                banks: self.num_rom_banks,
            }
            .report(true);
        }
        log::debug!(
            "MBC1 bank switch: rom={} ram={} mode={}",
            self.rom_bank(),
            self.ram_bank(),
            self.banking_mode
        );
    }

    fn ram_index(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled() || self.ram.is_empty() {
            return None;
        }
        let offset = (addr as usize).wrapping_sub(0xA000) & (RAM_BANK_SIZE - 1);
        Some((self.ram_bank() * RAM_BANK_SIZE + offset) % self.ram.len())
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        self.ram_index(addr).map_or(0xFF, |index| self.ram[index])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(index) = self.ram_index(addr) {
            self.ram[index] = value;
        }
    }
}
