mod alu;
mod control;
mod ld;
mod stack;
mod system;

use crate::opcodes::{Op, OpcodeDescriptor};

use super::{Bus, Cpu};

impl Cpu {
    /// Run the handler for one decoded instruction.
    ///
    /// Returns the new PC when the instruction transferred control and
    /// `None` when execution falls through to the next instruction. PC itself
    /// is left at the opcode; the caller applies the result.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, desc: &OpcodeDescriptor) -> Option<u16> {
        match desc.op {
            Op::Nop => None,

            Op::Ld | Op::Ldh => {
                self.exec_ld(bus, desc);
                None
            }

            Op::Inc | Op::Dec => {
                self.exec_incdec(bus, desc);
                None
            }

            Op::Add | Op::Adc | Op::Sub | Op::Sbc | Op::And | Op::Xor | Op::Or | Op::Cp => {
                self.exec_alu(bus, desc);
                None
            }

            Op::Rlca | Op::Rrca | Op::Rla | Op::Rra => {
                self.exec_rotate_a(desc.op);
                None
            }

            Op::Daa | Op::Cpl | Op::Scf | Op::Ccf => {
                self.exec_accumulator_misc(desc.op);
                None
            }

            Op::Jr => self.exec_jr(bus, desc),
            Op::Jp => self.exec_jp(bus, desc),
            Op::Call => self.exec_call(bus, desc),
            Op::Ret => self.exec_ret(bus, desc),
            Op::Reti => Some(self.exec_reti(bus)),
            Op::Rst => Some(self.exec_rst(bus, desc)),

            Op::Push | Op::Pop => {
                self.exec_push_pop(bus, desc);
                None
            }

            Op::Di | Op::Ei | Op::Halt | Op::Stop => {
                self.exec_system(bus, desc.op);
                None
            }

            Op::Rlc
            | Op::Rrc
            | Op::Rl
            | Op::Rr
            | Op::Sla
            | Op::Sra
            | Op::Swap
            | Op::Srl
            | Op::Bit
            | Op::Res
            | Op::Set => {
                self.exec_extended(bus, desc);
                None
            }

            // Resolved by `step` before a handler is chosen.
            Op::Prefix | Op::Illegal => None,
        }
    }
}
