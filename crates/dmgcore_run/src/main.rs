use std::io::Write;

use anyhow::Result;
use dmgcore_run::{RunConfig, StopReason};

fn main() -> Result<()> {
    env_logger::init();

    let config = RunConfig::from_args(std::env::args().skip(1))?;
    log::info!("Playing ROM path: '{}'", config.rom_path.display());

    let report = dmgcore_run::run(&config)?;

    if config.dump_serial && !report.serial.is_empty() {
        let mut stdout = std::io::stdout();
        stdout.write_all(&report.serial)?;
        stdout.write_all(b"\n")?;
    }

    match report.stop {
        StopReason::CycleLimit => eprintln!("stopped: cycle limit ({} cycles)", report.cycles),
        StopReason::FrameLimit => eprintln!("stopped: frame limit ({} frames)", report.frames),
        StopReason::IllegalOpcode(err) => eprintln!("halted: {err}"),
    }
    Ok(())
}
