//! Interrupt controller.
//!
//! Holds the enable mask (IE, `0xFFFF`), the request mask (IF, `0xFF0F`),
//! the master-enable flag and the two-stage latch used by `EI`. Hardware
//! sources post requests through [`InterruptController::raise`]; the CPU
//! takes the winning request at an instruction boundary through
//! [`InterruptController::take_pending`].

use bitflags::bitflags;

bitflags! {
    /// The five defined interrupt sources, by request/enable bit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// Interrupt source, in priority order (lower bit wins).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub fn from_bit(bit: u8) -> Option<Self> {
        Self::ALL.get(bit as usize).copied()
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(1 << self as u8)
    }

    /// Fixed handler address: `0x40 + 8 * bit`.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }
}

/// Observable controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptState {
    /// Nothing requested and enabled.
    Idle,
    /// At least one source is both requested and enabled.
    Pending,
    /// A handler was entered and has not returned with `RETI` yet.
    Servicing,
}

#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    /// IE. All eight bits are stored; only the low five name sources.
    enable: u8,
    /// IF.
    request: u8,
    ime: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    in_service: bool,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a request from a hardware source.
    pub fn raise(&mut self, source: Interrupt) {
        self.request |= source.flag().bits();
    }

    /// Post a request by raw bit index. Bits outside 0..=4 are ignored.
    pub fn raise_bit(&mut self, bit: u8) {
        match Interrupt::from_bit(bit) {
            Some(source) => self.raise(source),
            None => log::warn!("ignoring interrupt request for undefined source bit {bit}"),
        }
    }

    pub fn enable_mask(&self) -> u8 {
        self.enable
    }

    pub fn set_enable_mask(&mut self, value: u8) {
        self.enable = value;
    }

    pub fn request_mask(&self) -> u8 {
        self.request
    }

    pub fn set_request_mask(&mut self, value: u8) {
        self.request = value;
    }

    /// Requests that are also enabled, as flags.
    pub fn pending(&self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(self.enable & self.request)
    }

    pub fn master_enable(&self) -> bool {
        self.ime
    }

    /// Turning master-enable on also ends the current service period.
    pub fn set_master_enable(&mut self, enabled: bool) {
        self.ime = enabled;
        if enabled {
            self.in_service = false;
        }
    }

    /// `EI`: master-enable turns on after the instruction following `EI`.
    pub fn request_enable(&mut self) {
        self.ime_enable_pending = true;
    }

    /// `DI`: master-enable off, and a pending `EI` is cancelled.
    pub fn disable(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    /// Whether an `EI` is waiting to take effect.
    pub fn enable_pending(&self) -> bool {
        self.ime_enable_pending || self.ime_enable_delay
    }

    /// Advance the `EI` latch by one completed instruction.
    ///
    /// The step that executed `EI` arms the delay; the step after it turns
    /// master-enable on.
    pub fn advance_enable_latch(&mut self) {
        if self.ime_enable_delay {
            self.set_master_enable(true);
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }

    /// `RETI`: master-enable on immediately, handler finished.
    pub fn return_from_interrupt(&mut self) {
        self.set_master_enable(true);
    }

    pub fn state(&self) -> InterruptState {
        if self.in_service {
            InterruptState::Servicing
        } else if !self.pending().is_empty() {
            InterruptState::Pending
        } else {
            InterruptState::Idle
        }
    }

    /// Select the source to service at an instruction boundary.
    ///
    /// Returns `None` while master-enable is off. Otherwise the lowest
    /// requested-and-enabled bit wins; its request bit and master-enable
    /// are cleared before returning it.
    pub fn take_pending(&mut self) -> Option<Interrupt> {
        if !self.ime {
            return None;
        }
        let pending = self.pending().bits();
        if pending == 0 {
            return None;
        }
        let source = Interrupt::from_bit(pending.trailing_zeros() as u8)?;
        self.request &= !source.flag().bits();
        self.ime = false;
        self.in_service = true;
        Some(source)
    }
}
