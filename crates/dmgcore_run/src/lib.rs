use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dmgcore::{Error, Machine, MachineConfig};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_CYCLES: u64 = 10_000_000;

/// How far to run a program image.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunConfig {
    #[builder(setter(into))]
    pub rom_path: PathBuf,
    #[builder(default = DEFAULT_MAX_CYCLES)]
    pub max_cycles: u64,
    /// Stop after this many completed frames, if reached before
    /// `max_cycles`.
    #[builder(default, setter(strip_option))]
    pub max_frames: Option<u64>,
    /// Print captured serial output when the run ends.
    #[builder(default = true)]
    pub dump_serial: bool,
}

impl RunConfig {
    /// Parse `<rom_path> [max_cycles] [max_frames] [--no-serial]`.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut dump_serial = true;
        for arg in args {
            match arg.as_str() {
                "--no-serial" => dump_serial = false,
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let Some(rom_path) = positional.next() else {
            bail!("usage: dmgcore <rom_path> [max_cycles] [max_frames] [--no-serial]");
        };
        let max_cycles = match positional.next() {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid max_cycles '{value}'"))?,
            None => DEFAULT_MAX_CYCLES,
        };
        let max_frames = positional
            .next()
            .map(|value| {
                value
                    .parse()
                    .with_context(|| format!("invalid max_frames '{value}'"))
            })
            .transpose()?;
        if let Some(extra) = positional.next() {
            bail!("unexpected argument '{extra}'");
        }

        Ok(Self {
            rom_path: PathBuf::from(rom_path),
            max_cycles,
            max_frames,
            dump_serial,
        })
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CycleLimit,
    FrameLimit,
    /// The CPU hit an undefined opcode. Test programs commonly end this
    /// way, so it is a result rather than a failure.
    IllegalOpcode(Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub title: String,
    pub cycles: u64,
    pub frames: u64,
    pub stop: StopReason,
    pub serial: Vec<u8>,
}

/// Load the image at `config.rom_path` and run it.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let image = std::fs::read(&config.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", config.rom_path.display()))?;
    run_image(config, &image)
}

/// Run an in-memory image under the limits in `config`.
pub fn run_image(config: &RunConfig, image: &[u8]) -> Result<RunReport> {
    let mut machine = Machine::new(MachineConfig::default());
    machine
        .load_image(image)
        .context("failed to load program image")?;
    let title = machine
        .header()
        .map(|header| header.title.clone())
        .unwrap_or_default();
    log::info!("running '{title}' for at most {} cycles", config.max_cycles);

    let stop = drive(&mut machine, config)?;
    let report = RunReport {
        title,
        cycles: machine.total_cycles(),
        frames: machine.current_frame(),
        stop,
        serial: machine.take_serial_output(),
    };
    log::info!(
        "stopped after {} cycles, {} frames: {:?}",
        report.cycles,
        report.frames,
        report.stop
    );
    Ok(report)
}

fn drive(machine: &mut Machine, config: &RunConfig) -> Result<StopReason> {
    while machine.total_cycles() < config.max_cycles {
        if let Some(limit) = config.max_frames {
            if machine.current_frame() >= limit {
                return Ok(StopReason::FrameLimit);
            }
        }
        match machine.tick() {
            Ok(()) => {}
            Err(err @ Error::IllegalOpcode { .. }) => {
                let pc = machine.registers().pc;
                log::info!("halted at {pc:04X}: {}", machine.disassemble(pc));
                return Ok(StopReason::IllegalOpcode(err));
            }
            Err(err) => return Err(err).context("execution stopped"),
        }
    }
    Ok(StopReason::CycleLimit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Plain image: the program at 0x0100 and a valid header checksum.
    fn image(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x100..0x100 + program.len()].copy_from_slice(program);
        rom[0x134..0x138].copy_from_slice(b"SMOK");
        rom[0x14D] = dmgcore::CartridgeHeader::compute_checksum(&rom);
        rom
    }

    #[test]
    fn parses_positional_arguments() {
        let config = RunConfig::from_args(args(&["test.gb", "5000", "3", "--no-serial"])).unwrap();
        assert_eq!(config.rom_path, PathBuf::from("test.gb"));
        assert_eq!(config.max_cycles, 5000);
        assert_eq!(config.max_frames, Some(3));
        assert!(!config.dump_serial);
    }

    #[test]
    fn defaults_apply_to_missing_arguments() {
        let config = RunConfig::from_args(args(&["test.gb"])).unwrap();
        assert_eq!(config, RunConfig::builder().rom_path("test.gb").build());
        assert_eq!(config.max_cycles, DEFAULT_MAX_CYCLES);
        assert!(config.dump_serial);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(RunConfig::from_args(args(&[])).is_err());
        assert!(RunConfig::from_args(args(&["a.gb", "many"])).is_err());
        assert!(RunConfig::from_args(args(&["a.gb", "1", "2", "3"])).is_err());
        assert!(RunConfig::from_args(args(&["a.gb", "--fast"])).is_err());
    }

    #[test]
    fn smoke_run_stops_at_illegal_opcode_with_serial_output() {
        let program = [
            0x3E, b'!', // LD A,'!'
            0xE0, 0x01, // LDH (SB),A
            0x3E, 0x81, // LD A,0x81
            0xE0, 0x02, // LDH (SC),A
            0xDD, //       undefined
        ];
        let config = RunConfig::builder().rom_path("unused").build();
        let report = run_image(&config, &image(&program)).unwrap();
        assert_eq!(report.title, "SMOK");
        assert_eq!(report.serial, b"!");
        assert!(matches!(
            report.stop,
            StopReason::IllegalOpcode(Error::IllegalOpcode { opcode: 0xDD, pc: 0x0108, .. })
        ));
    }

    #[test]
    fn frame_and_cycle_limits() {
        // JR -2 forever.
        let spin = image(&[0x18, 0xFE]);

        let config = RunConfig::builder().rom_path("unused").max_frames(2).build();
        let report = run_image(&config, &spin).unwrap();
        assert_eq!(report.stop, StopReason::FrameLimit);
        assert_eq!(report.frames, 2);

        let config = RunConfig::builder().rom_path("unused").max_cycles(1000).build();
        let report = run_image(&config, &spin).unwrap();
        assert_eq!(report.stop, StopReason::CycleLimit);
        assert_eq!(report.cycles, 1000);
    }

    #[test]
    fn missing_file_is_an_error() {
        let config = RunConfig::builder()
            .rom_path("/nonexistent/path/to.gb")
            .build();
        assert!(run(&config).is_err());
    }
}
