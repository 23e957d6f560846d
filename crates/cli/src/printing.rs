use log::info;
use std::io::{self, Write};
use variantize_sim::simulation::{Configuration, MutationSpec, PipelineOutput, write_record};

/// Log the resolved run parameters at info level.
pub fn log_parameters(config: &Configuration, spec: &MutationSpec) {
    let m = &config.mutation;
    info!("Operator codes: {spec}");
    match config.seed {
        Some(seed) => info!("Random seed: {seed}"),
        None => info!("Random seed: from entropy"),
    }
    info!("Substitution rate: {:.2e}", m.substitution.rate);
    for (name, section) in [
        ("Small indel", &m.small_indel),
        ("Large indel", &m.large_indel),
        ("Inversion", &m.inversion),
        ("Dispersed duplication", &m.dispersed_duplication),
        ("Non-reciprocal translocation", &m.nr_translocation),
        ("Reciprocal translocation", &m.r_translocation),
    ] {
        info!(
            "{name} rate: {:.2e}, size ~ Gamma({}, {})",
            section.rate, section.shape, section.scale
        );
    }
    let t = &m.tandem_duplication;
    info!(
        "Tandem duplication rate: {:.2e}, size ~ Gamma({}, {}), copies ~ Poisson({}) + 1",
        t.rate, t.shape, t.scale, t.repeat_lambda
    );
}

/// Write one mutated record. Upper case unless `marked` asks for the
/// lower/upper mutation marks.
pub fn emit_record<W: Write>(
    writer: &mut W,
    header: &str,
    output: &PipelineOutput,
    marked: bool,
) -> io::Result<()> {
    let text = if marked {
        output.sequence.marked()
    } else {
        output.sequence.to_string()
    };
    write_record(writer, header, &text)
}
