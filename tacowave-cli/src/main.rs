use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use tacowave_core::{initialize_logging, HParams, Overrides};
use tracing::info;

mod describe;

#[derive(Parser)]
#[command(version, about = "Resolve and print the Tacotron-2 + WaveNet hyperparameters")]
struct Args {
    /// Comma-separated `name=value` overrides, e.g. `n_fft=2048,upsample_scales=[16,16]`.
    #[arg(long)]
    hparams: Option<String>,

    /// JSON object of overrides. Applied before `--hparams`.
    #[arg(long)]
    hparams_json: Option<PathBuf>,

    /// Report every violated cross-field relation instead of failing, and exit
    /// with a non-zero status if there are any.
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Print the schema (name, type, default, description) and exit.
    #[arg(long, default_value_t = false, conflicts_with = "check")]
    describe: bool,
}

fn load_overrides(args: &Args) -> Result<Overrides> {
    let mut overrides = Overrides::new();
    if let Some(path) = &args.hparams_json {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read overrides file {}", path.display()))?;
        let from_file = Overrides::from_json(&contents)
            .with_context(|| format!("Failed to parse JSON overrides in {}", path.display()))?;
        overrides = overrides.merge(&from_file);
    }
    if let Some(spec) = &args.hparams {
        let inline = Overrides::parse(spec).context("Failed to parse `--hparams`")?;
        overrides = overrides.merge(&inline);
    }
    Ok(overrides)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    initialize_logging();

    if args.describe {
        describe::print_schema()?;
        return Ok(ExitCode::SUCCESS);
    }

    let overrides = load_overrides(&args)?;
    info!("Resolving hyperparameters with {} override(s)", overrides.len());

    if args.check {
        let (_, violations) = HParams::from_overrides_advisory(&overrides)?;
        if violations.is_empty() {
            println!("ok");
            return Ok(ExitCode::SUCCESS);
        }
        for violation in &violations {
            println!("{violation}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let hparams = HParams::from_overrides(&overrides)?;
    println!("{}", hparams.debug_string());
    Ok(ExitCode::SUCCESS)
}
