use crate::cpu::{Bus, Cpu};
use crate::opcodes::OpcodeDescriptor;

impl Cpu {
    /// All `LD`/`LDH` forms.
    ///
    /// The width follows the source: a 16-bit source (pair, `d16`, `SP+e8`)
    /// makes a 16-bit transfer, including `LD (a16),SP` which stores SP low
    /// byte first.
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) {
        let (Some(dst), Some(src)) = (desc.target(), desc.source()) else {
            return;
        };

        if src.is_wide() {
            let value = self.read_operand16(bus, src);
            self.write_operand16(bus, dst, value);
        } else {
            let value = self.read_operand8(bus, src);
            self.write_operand8(bus, dst, value);
        }
    }
}
