/// Handler for memory-mapped I/O registers the bus does not model itself.
///
/// The bus passes the absolute address, so one handler can back several
/// registers.
pub trait IoHandler {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

/// Plain read/write latches for a run of consecutive registers.
///
/// Used for registers whose consumer (the renderer) lives outside the
/// core: LCDC, scroll, palettes and window position.
#[derive(Clone, Debug)]
pub struct LatchBank {
    base: u16,
    regs: Vec<u8>,
}

impl LatchBank {
    pub fn new(base: u16, len: usize) -> Self {
        Self {
            base,
            regs: vec![0; len],
        }
    }

    fn slot(&mut self, addr: u16) -> Option<&mut u8> {
        let index = addr.checked_sub(self.base)? as usize;
        self.regs.get_mut(index)
    }
}

impl IoHandler for LatchBank {
    fn read(&mut self, addr: u16) -> u8 {
        self.slot(addr).map_or(0, |value| *value)
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some(slot) = self.slot(addr) {
            *slot = value;
        }
    }
}
