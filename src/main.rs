//! dancemidi: generate a four-track dance loop as a MIDI file.
//!
//! Prints the written path on success. Errors go to stderr, prefixed with
//! their kind, and exit with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dancemidi::{build, output, GenConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "dancemidi", version, about = "Seeded dance loop MIDI generator")]
struct Cli {
    /// RNG seed (same seed and config => same file)
    #[arg(long)]
    seed: Option<u64>,

    /// Output .mid path (default: dance_track_NNNN.mid)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file (default: ~/.dancemidi/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<PathBuf> {
    let mut config = match &cli.config {
        Some(path) => GenConfig::load(path)?,
        None => GenConfig::load_default()?,
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let rendered = build(&config)?;
    let path = cli.output.unwrap_or(rendered.file_name);
    output::write_atomic(&path, &rendered.bytes)?;
    Ok(path)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
