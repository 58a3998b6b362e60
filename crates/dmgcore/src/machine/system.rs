use crate::cpu::{Bus, Cpu, Registers};
use crate::error::{Error, Result};
use crate::interrupts::InterruptController;

use super::{
    bus::{Button, IoHandler, SystemBus},
    cartridge::{Cartridge, CartridgeHeader},
    config::MachineConfig,
};

/// CPU, bus and peripherals of one emulated system.
///
/// Two ways to drive it:
/// - the stepping interface (`cpu_step`, `timing_step`, `interrupt_poll`,
///   `bus_read`, `bus_write`) for a caller that schedules the pieces
///   itself;
/// - the scheduler (`tick`, `run_cycles`, `step_frame`), which steps the
///   CPU whenever its cycle budget runs out and advances the timing
///   generator one cycle per tick.
pub struct Machine {
    cpu: Cpu,
    pub(crate) bus: SystemBus,
    config: MachineConfig,
    /// Cycles left before the CPU fetches again.
    budget: u32,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

impl Machine {
    pub fn new(config: MachineConfig) -> Self {
        let mut machine = Self {
            cpu: Cpu::zeroed(),
            bus: SystemBus::new(config.strict_io_logging),
            config,
            budget: 0,
        };
        machine.reset();
        machine
    }

    /// Insert a program image and return the whole machine to power-on
    /// state. On error the previous cartridge stays in place.
    pub fn load_image(&mut self, image: &[u8]) -> Result<()> {
        let (cartridge, header) = Cartridge::load(image)?;
        self.bus.insert_cartridge(cartridge, header);
        self.reset();
        Ok(())
    }

    /// Power-cycle. Clears a latched fault; the cartridge stays inserted.
    pub fn reset(&mut self) {
        let post_boot = self.config.post_boot_state;
        self.cpu.reset(post_boot);
        self.bus.reset(post_boot);
        self.budget = 0;
    }

    /// Execute one instruction (or one halted slot) and return its cost.
    pub fn cpu_step(&mut self) -> Result<u32> {
        self.cpu.step(&mut self.bus)
    }

    /// Advance video timing and the timer by `cycles`.
    pub fn timing_step(&mut self, cycles: u32) {
        self.bus.tick(cycles);
    }

    /// Service a pending interrupt now, returning the vector entered.
    pub fn interrupt_poll(&mut self) -> Option<u16> {
        self.cpu.poll_and_service(&mut self.bus)
    }

    pub fn bus_read(&mut self, addr: u16) -> u8 {
        self.bus.read8(addr)
    }

    pub fn bus_write(&mut self, addr: u16, value: u8) {
        self.bus.write8(addr, value)
    }

    /// One scheduler cycle.
    ///
    /// When the budget is spent the CPU steps and the budget is re-primed
    /// from the returned cost; then the timing generator advances one
    /// cycle. A fault is returned before any time passes.
    pub fn tick(&mut self) -> Result<()> {
        if self.budget == 0 {
            self.budget = self.cpu_step()?;
        }
        self.budget = self.budget.saturating_sub(1);
        self.bus.tick(1);
        Ok(())
    }

    /// Run up to `cycles` scheduler cycles. Returns the number run, or
    /// the fatal error that stopped the run early.
    pub fn run_cycles(&mut self, cycles: u64) -> Result<u64> {
        for _ in 0..cycles {
            self.tick()?;
        }
        Ok(cycles)
    }

    /// Run until the frame counter advances and return the cycles taken.
    pub fn step_frame(&mut self) -> Result<u64> {
        let frame = self.current_frame();
        let mut cycles = 0u64;
        while self.current_frame() == frame {
            self.tick()?;
            cycles += 1;
        }
        Ok(cycles)
    }

    /// Assembler text for the instruction at `addr`.
    pub fn disassemble(&mut self, addr: u16) -> String {
        Cpu::disassemble(&mut self.bus, addr)
    }

    /// The `IllegalOpcode` that locked the CPU, if any.
    pub fn fault(&self) -> Option<Error> {
        self.cpu.fault()
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bus.serial.output)
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.set_button(button, pressed);
    }

    /// Attach a handler to I/O registers the bus does not model itself.
    /// Returns false when any address in `addrs` is unavailable.
    pub fn register_io_handler(
        &mut self,
        addrs: std::ops::RangeInclusive<u16>,
        handler: Box<dyn IoHandler>,
    ) -> bool {
        self.bus.register_io_handler(addrs, handler)
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.bus.interrupts
    }

    pub fn header(&self) -> Option<&CartridgeHeader> {
        self.bus.header()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Bank mapped at 0x4000-0x7FFF.
    pub fn rom_bank(&self) -> u16 {
        self.bus.rom_bank()
    }

    pub fn current_line(&self) -> u8 {
        self.bus.timing.current_line()
    }

    pub fn current_frame(&self) -> u64 {
        self.bus.timing.current_frame()
    }

    /// Cycles the timing generator has advanced since reset.
    pub fn total_cycles(&self) -> u64 {
        self.bus.timing.total_cycles()
    }
}
