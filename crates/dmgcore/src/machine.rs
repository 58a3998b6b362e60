//! The full system around the CPU: address-decoded bus, cartridge with its
//! bank controller, video timing, timer, serial port and joypad, wired
//! together by [`Machine`].

mod bus;
mod cartridge;
mod config;
mod serial;
mod system;
mod timer;
mod timing;

pub use bus::{Button, IoHandler, LatchBank};
pub use cartridge::CartridgeHeader;
pub use config::MachineConfig;
pub use system::Machine;
pub use timing::{CYCLES_PER_LINE, FRAME_CYCLES, LINES_PER_FRAME, VBLANK_LINE};
