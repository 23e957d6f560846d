mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use args::RateOverrides;
use commands::mutate::{MutateOptions, mutate_fasta};

/// Variantize: a stochastic DNA sequence mutator
///
/// Reads every record of a FASTA file, passes it through the requested
/// variant generators in order and writes the mutated records to stdout.
///
/// Operator codes: s substitutions, i small indels, l/I large indels,
/// v inversions, t tandem duplications, d dispersed duplications,
/// n non-reciprocal translocations, r reciprocal translocations.
#[derive(Parser, Debug)]
#[command(name = "variantize")]
#[command(author, version, about = "Introduces random variants into DNA sequences", long_about = None)]
struct Cli {
    /// Input FASTA file
    fasta: PathBuf,

    /// Operator codes applied in order, e.g. "sivt"
    operators: String,

    /// Random seed for reproducible output (overrides the configuration file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file with a seed and per-operator parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    rates: RateOverrides,

    /// Keep mutation marks in the output: untouched bases lower case,
    /// mutated bases upper case
    #[arg(long)]
    marked: bool,
}

fn main() -> Result<ExitCode> {
    defaults::init_logging();
    let cli = Cli::parse();

    let options = MutateOptions {
        fasta: cli.fasta,
        operators: cli.operators,
        seed: cli.seed,
        config: cli.config,
        rates: cli.rates,
        marked: cli.marked,
    };

    let failed = mutate_fasta(&options)?;
    if failed > 0 {
        log::error!("{failed} record(s) could not be processed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
