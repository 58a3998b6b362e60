//! Deterministic, steppable DMG execution core.
//!
//! [`Machine`] wires the [`Cpu`](cpu::Cpu) to an address-decoded bus with
//! cartridge banking, the interrupt controller, video timing, the timer,
//! the serial port and the joypad register. Pixel output, audio and
//! real-time pacing belong to the caller.

pub mod cpu;
pub mod error;
pub mod interrupts;
pub mod machine;
pub mod opcodes;

pub use error::{Error, Result};
pub use interrupts::{Interrupt, InterruptController, InterruptFlags, InterruptState};
pub use machine::{Button, CartridgeHeader, IoHandler, LatchBank, Machine, MachineConfig};
