use anyhow::{Context, Result};
use log::{error, info};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use variantize_sim::simulation::{
    Configuration, FastaRecord, MutationSpec, Pipeline, read_fasta, rng_from_seed,
};

use crate::args::RateOverrides;
use crate::printing::{emit_record, log_parameters};

/// Everything `mutate_fasta` needs from the command line.
#[derive(Debug)]
pub struct MutateOptions {
    pub fasta: PathBuf,
    pub operators: String,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub rates: RateOverrides,
    pub marked: bool,
}

/// Resolve defaults, then the configuration file, then command-line flags.
pub fn resolve_configuration(options: &MutateOptions) -> Result<Configuration> {
    let mut config = match &options.config {
        Some(path) => Configuration::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    options.rates.apply(&mut config.mutation);
    Ok(config)
}

/// Mutate every record of the input file and write the results to stdout.
///
/// Returns the number of records that could not be processed. Configuration
/// and input file problems are errors raised before anything is written.
pub fn mutate_fasta(options: &MutateOptions) -> Result<usize> {
    let config = resolve_configuration(options)?;
    let spec = MutationSpec::parse(&options.operators);
    let pipeline =
        Pipeline::new(spec, &config.mutation).context("Invalid mutation parameters")?;
    log_parameters(&config, pipeline.spec());

    let records = load_records(&options.fasta)?;
    let mut rng = rng_from_seed(config.seed);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = 0;

    for record in &records {
        match pipeline.mutate_record(&record.sequence, &mut rng) {
            Ok(output) => {
                info!(
                    "{}: {} events, length {} -> {}",
                    record.header,
                    output.total_events(),
                    record.sequence.len(),
                    output.sequence.len()
                );
                emit_record(&mut out, &record.header, &output, options.marked)
                    .context("Failed to write output")?;
            }
            Err(e) => {
                error!("Skipping record '{}': {e}", record.header);
                failed += 1;
            }
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(failed)
}

fn load_records(path: &Path) -> Result<Vec<FastaRecord>> {
    read_fasta(path).with_context(|| format!("Failed to read FASTA file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn options(config: Option<PathBuf>) -> MutateOptions {
        MutateOptions {
            fasta: PathBuf::from("unused.fa"),
            operators: "s".to_string(),
            seed: None,
            config,
            rates: RateOverrides::default(),
            marked: false,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "seed": 3, "mutation": {{ "substitution": {{ "rate": 0.2 }} }} }}"#
        )
        .unwrap();

        let mut opts = options(Some(file.path().to_path_buf()));
        let config = resolve_configuration(&opts).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.mutation.substitution.rate, 0.2);

        opts.seed = Some(9);
        opts.rates.snp_rate = Some(0.7);
        let config = resolve_configuration(&opts).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.mutation.substitution.rate, 0.7);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let opts = options(Some(PathBuf::from("/nonexistent/config.json")));
        let err = resolve_configuration(&opts).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
