//! LR35902 CPU core.
//!
//! The CPU owns nothing but its register file and two status bits. Memory,
//! I/O and the interrupt controller are reached through [`Bus`], borrowed
//! for the duration of one [`Cpu::step`].
//!
//! Execution is descriptor-driven: the byte at PC selects an
//! [`OpcodeDescriptor`](crate::opcodes::OpcodeDescriptor) and the handler
//! for its [`Op`](crate::opcodes::Op) tag interprets the operand roles. PC
//! is only moved after the handler has run, either to the jump target it
//! returned or past the instruction.

mod alu;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use regs::{Flag, Reg16, Reg8, RegisterPair, Registers};

use crate::error::Error;
use crate::interrupts::InterruptController;

/// Interrupt dispatch cost, added to the step that serviced it.
pub const INTERRUPT_DISPATCH_CYCLES: u32 = 20;

/// Cost reported by a step taken while halted.
pub const HALT_IDLE_CYCLES: u32 = 4;

/// Memory and interrupt access as seen by the CPU.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
    /// The interrupt controller backing IE/IF, master-enable and the `EI`
    /// latch.
    fn interrupts(&mut self) -> &mut InterruptController;
}

#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Set by `HALT`; cleared only when an interrupt is serviced.
    pub halted: bool,
    /// Latched `IllegalOpcode`. While set every step returns it.
    fault: Option<Error>,
}

impl Cpu {
    /// The condition that locked the CPU, if any.
    pub fn fault(&self) -> Option<Error> {
        self.fault
    }

    pub fn is_locked(&self) -> bool {
        self.fault.is_some()
    }
}
