//! `simseq`: synthetic DNA from a two-state hidden Markov model.

#[path = "../defaults.rs"]
mod defaults;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use variantize_sim::generation::HiddenMarkovModel;
use variantize_sim::simulation::rng_from_seed;

/// Generate synthetic DNA sequences
///
/// Each sequence alternates between long uniform stretches and AT-rich
/// stretches. Records are written as `>{index}` followed by the lower-case
/// sequence.
#[derive(Parser, Debug)]
#[command(name = "simseq")]
#[command(author, version, about = "Generates synthetic DNA sequences", long_about = None)]
struct Cli {
    /// Length of each generated sequence
    length: usize,

    /// Number of sequences to generate
    chroms: usize,

    /// Output file (stdout if not specified)
    out_name: Option<PathBuf>,

    /// Random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    defaults::init_logging();
    let cli = Cli::parse();

    let writer: Box<dyn Write> = match &cli.out_name {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(writer);

    let model = HiddenMarkovModel::default();
    let mut rng = rng_from_seed(cli.seed);

    for index in 0..cli.chroms {
        let generated = model.generate(cli.length, &mut rng);
        info!("Generated sequence {index} ({} bp)", cli.length);
        writeln!(out, ">{index}")?;
        writeln!(out, "{}", generated.sequence.marked())?;
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}
