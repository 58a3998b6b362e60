use crate::error::{Error, Result};
use crate::opcodes::{self, OpcodeDescriptor};

use super::{Bus, Cpu, HALT_IDLE_CYCLES, INTERRUPT_DISPATCH_CYCLES};

impl Cpu {
    /// Execute one instruction and return the cycles it took.
    ///
    /// Order within a step: the instruction (or one idle slot while
    /// halted), then the `EI` latch, then interrupt service. A serviced
    /// interrupt adds its dispatch cost to the returned count.
    ///
    /// An undefined opcode locks the CPU: PC stays on the offending byte
    /// and this call, and every later one, returns `Error::IllegalOpcode`.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let mut cycles = if self.halted {
            HALT_IDLE_CYCLES
        } else {
            self.step_instruction(bus)?
        };

        bus.interrupts().advance_enable_latch();

        if self.poll_and_service(bus).is_some() {
            cycles += INTERRUPT_DISPATCH_CYCLES;
        }
        Ok(cycles)
    }

    fn step_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let pc = self.regs.pc;
        let desc = self.decode_at(bus, pc)?;

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{pc:04X}  {}", Self::disassemble(bus, pc));
        }

        let target = self.execute(bus, desc);
        let taken = target.is_some();
        self.regs.pc = target.unwrap_or_else(|| pc.wrapping_add(desc.length as u16));

        let mut cycles = desc.cycles as u32;
        if taken {
            cycles += desc.taken_cycles as u32;
        }
        Ok(cycles)
    }

    /// Render the instruction at `addr` with its operand bytes.
    pub fn disassemble<B: Bus>(bus: &mut B, addr: u16) -> String {
        let mut desc = opcodes::decode(bus.read8(addr));
        if desc.op == opcodes::Op::Prefix {
            desc = opcodes::decode_prefixed(bus.read8(addr.wrapping_add(1)));
        }
        let bytes: Vec<u8> = (0..desc.length as u16)
            .map(|i| bus.read8(addr.wrapping_add(i)))
            .collect();
        desc.render(addr, &bytes)
    }

    /// Resolve the descriptor for the instruction at `pc`, following the
    /// `0xCB` prefix into the extended table.
    fn decode_at<B: Bus>(&mut self, bus: &mut B, pc: u16) -> Result<&'static OpcodeDescriptor> {
        let opcode = bus.read8(pc);
        let mut desc = opcodes::decode(opcode);
        if desc.op == opcodes::Op::Prefix {
            desc = opcodes::decode_prefixed(bus.read8(pc.wrapping_add(1)));
        }

        if desc.is_illegal() {
            let fault = Error::IllegalOpcode {
                opcode: desc.value,
                prefixed: desc.prefixed,
                pc,
            };
            fault.report(true);
            self.fault = Some(fault);
            return Err(fault);
        }
        Ok(desc)
    }
}
