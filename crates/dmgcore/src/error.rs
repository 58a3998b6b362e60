use thiserror::Error;

/// Conditions raised by the core.
///
/// Only `IllegalOpcode` (and `InvalidImage` at load time) stop execution.
/// The others are recovered where they happen: they are logged through
/// [`Error::report`] and the access falls back to a fixed default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The byte at the program counter has no defined decode.
    #[error("illegal opcode {}0x{opcode:02X} at PC=0x{pc:04X}", prefix_label(.prefixed))]
    IllegalOpcode { opcode: u8, prefixed: bool, pc: u16 },

    /// A ROM bank beyond the end of the image was selected.
    #[error("ROM bank {bank} selected but the image only has {banks} banks")]
    BankOverflow { bank: u16, banks: u16 },

    /// I/O register address with no registered handler.
    #[error("unmapped I/O access at 0x{addr:04X}")]
    UnmappedIo { addr: u16 },

    /// Access to the dead 0xFEA0..=0xFEFF range.
    #[error("access to unusable region at 0x{addr:04X}")]
    UnusableRegion { addr: u16 },

    /// The image is too short to contain a cartridge header.
    #[error("program image of {len} bytes is too short to contain a header")]
    InvalidImage { len: usize },
}

fn prefix_label(prefixed: &bool) -> &'static str {
    if *prefixed {
        "CB "
    } else {
        ""
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the condition must propagate to the caller as a stop signal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::IllegalOpcode { .. } | Error::InvalidImage { .. })
    }

    /// Log a recovered condition.
    ///
    /// I/O probes are common in test programs, so they stay at debug level
    /// unless `loud` is set.
    pub(crate) fn report(self, loud: bool) {
        match self {
            Error::UnmappedIo { .. } | Error::UnusableRegion { .. } if !loud => {
                log::debug!("{self}")
            }
            Error::IllegalOpcode { .. } => log::error!("{self}"),
            _ => log::warn!("{self}"),
        }
    }
}
