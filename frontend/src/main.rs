use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gatekeeper_machines::{registry, rom_loader};

mod config;
mod error;
mod rom_path;
mod runner;

use error::RunError;

const DEFAULT_MACHINE: &str = "gatekeeper";
const DEFAULT_FRAMES: u64 = 60;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Hex,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "gatekeeper",
    about = "Headless cabinet coprocessor runner: replays a host script and dumps shared memory."
)]
struct Args {
    /// Board to run (see --list).
    machine: Option<String>,

    /// Translator table ROM: a ZIP, a rompath directory, or loose files.
    #[arg(long, value_name = "PATH")]
    tables: Option<PathBuf>,

    /// Host script (TOML). Defaults to <config dir>/gatekeeper/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long)]
    frames: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Hex)]
    format: OutputFormat,

    /// List available boards and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), RunError> {
    if args.list {
        for entry in registry::all() {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    let script = config::load(args.config.as_deref())?;

    let name = args
        .machine
        .or_else(|| script.machine.clone())
        .unwrap_or_else(|| DEFAULT_MACHINE.to_string());
    let entry = registry::find(&name).ok_or_else(|| RunError::UnknownMachine {
        available: registry::all()
            .iter()
            .map(|e| e.name)
            .collect::<Vec<_>>()
            .join(", "),
        name,
    })?;

    let rom_set = args
        .tables
        .or_else(|| script.tables.clone())
        .map(|path| rom_path::load_rom_set(entry.rom_name, &path))
        .transpose()?;
    match (&rom_set, script.tables_crc32) {
        (Some(set), Some(crc)) => rom_loader::verify_table_image(set, crc)?,
        (None, _) => log::info!("no table ROM given; using built-in translator tables"),
        _ => {}
    }

    let mut machine = (entry.create)(rom_set.as_ref())?;
    machine.set_dip_switches(&[script.dips.dip_a, script.dips.dip_b]);
    machine.reset();

    let frames = args.frames.or(script.frames).unwrap_or(DEFAULT_FRAMES);
    log::info!("running {} for {frames} frame(s)", entry.name);
    let snapshot = runner::run_script(machine.as_mut(), &script.events, frames)?;

    match args.format {
        OutputFormat::Hex => print!("{}", snapshot.hex_dump()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }
    Ok(())
}
