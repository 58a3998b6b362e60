use typed_builder::TypedBuilder;

/// Start-up options for a [`Machine`](super::Machine).
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    /// Start from the state the boot ROM hands over at PC=0x0100. When
    /// false, registers and I/O start zeroed with PC=0x0000.
    #[builder(default = true)]
    pub post_boot_state: bool,
    /// Log unmapped I/O and unusable-region accesses at warn level
    /// instead of debug.
    #[builder(default = false)]
    pub strict_io_logging: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
