//! Minimal FASTA reading and writing.
//!
//! Headers are kept verbatim after the leading `>`, including any whitespace
//! that follows it. Sequence lines are concatenated and blank lines ignored.
//! Sequence text is not validated here; that happens per record when it is
//! parsed into a [`Sequence`].
//!
//! [`Sequence`]: crate::base::Sequence

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::errors::FastaError;

/// A single FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Header line without the `>` prefix
    pub header: String,
    /// Raw sequence text with line breaks removed
    pub sequence: String,
}

/// Parse FASTA text into records, in file order.
///
/// # Errors
/// Fails on sequence data before the first header, on a repeated header,
/// and when the input holds no records at all.
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>, FastaError> {
    let mut records: Vec<FastaRecord> = Vec::new();
    let mut seen = HashSet::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            let header = header.to_string();
            if !seen.insert(header.clone()) {
                return Err(FastaError::Parse(format!(
                    "duplicate header '{header}' on line {}",
                    line_no + 1
                )));
            }
            records.push(FastaRecord {
                header,
                sequence: String::new(),
            });
        } else {
            let record = records.last_mut().ok_or_else(|| {
                FastaError::Parse(format!(
                    "sequence data before the first header on line {}",
                    line_no + 1
                ))
            })?;
            record.sequence.push_str(line);
        }
    }

    if records.is_empty() {
        return Err(FastaError::Parse("no FASTA records found".to_string()));
    }
    Ok(records)
}

/// Read all records from a FASTA file.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>, FastaError> {
    let file = File::open(path)?;
    parse_fasta(BufReader::new(file))
}

/// Write one record followed by a blank separator line.
pub fn write_record<W: Write>(writer: &mut W, header: &str, sequence: &str) -> std::io::Result<()> {
    writeln!(writer, ">{header}")?;
    writeln!(writer, "{sequence}")?;
    writeln!(writer)
}
