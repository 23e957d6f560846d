use std::error;
use std::fmt;

/// Error returned when attempting to convert an invalid byte/character into
/// a `Nucleotide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNucleotide(pub u8);

impl fmt::Display for InvalidNucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid nucleotide byte: {} ('{}')", self.0, self.0 as char)
    }
}

impl error::Error for InvalidNucleotide {}

/// Error type for failures when constructing a `Sequence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequence {
    /// A character outside the DNA alphabet, with its 0-based position.
    InvalidChar { ch: char, position: usize },
}

impl fmt::Display for InvalidSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { ch, position } => {
                write!(f, "Invalid character in sequence: '{ch}' at position {position}")
            }
        }
    }
}

impl error::Error for InvalidSequence {}

/// Errors raised while building a mutation operator.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// Trigger probability outside `[0, 1]`.
    InvalidProbability(&'static str, f64),
    /// Parameters rejected by the underlying sampling distribution.
    InvalidDistribution(&'static str, String),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProbability(name, p) => {
                write!(
                    f,
                    "Invalid probability for {name}: {p} (must be between 0.0 and 1.0)"
                )
            }
            Self::InvalidDistribution(name, msg) => {
                write!(f, "Invalid distribution parameters for {name}: {msg}")
            }
        }
    }
}

impl error::Error for MutationError {}

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error
    Io(std::io::Error),
    /// Malformed configuration document
    Parse(String),
    /// Well-formed configuration with out-of-range parameters
    Invalid(MutationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(msg) => write!(f, "Parse error: {msg}"),
            Self::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Invalid(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

impl From<MutationError> for ConfigError {
    fn from(e: MutationError) -> Self {
        Self::Invalid(e)
    }
}

/// Errors produced by the FASTA reader.
#[derive(Debug)]
pub enum FastaError {
    /// IO error
    Io(std::io::Error),
    /// Structural problem in the FASTA text
    Parse(String),
}

impl fmt::Display for FastaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(msg) => write!(f, "FASTA parse error: {msg}"),
        }
    }
}

impl error::Error for FastaError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for FastaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors from the hidden-Markov sequence generator.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// A transition or emission row is not a probability distribution.
    InvalidMatrix(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMatrix(msg) => write!(f, "Invalid model matrix: {msg}"),
        }
    }
}

impl error::Error for GeneratorError {}
