use super::SystemBus;

impl SystemBus {
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        // Copy 160 bytes from XX00..XX9F to FE00..FE9F through the normal
        // decode path. The transfer completes at once; bus conflicts and
        // its 160 M-cycle duration are not modelled.
        let base = (value as u16) << 8;
        for i in 0u16..0xA0 {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.write8_mmio(0xFE00 + i, byte);
        }
        self.dma_source = value;
        log::debug!("OAM DMA from 0x{base:04X}");
    }
}
