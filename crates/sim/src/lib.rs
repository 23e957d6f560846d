//! # Variantize simulation crate
//!
//! Core library behind the `variantize` and `simseq` tools. It provides:
//! - base types: [`Nucleotide`], [`Sequence`] with its mutation mask, and [`Window`]
//! - the eight variant generators in [`evolution`]
//! - the ordered [`Pipeline`](simulation::Pipeline), its JSON configuration and FASTA glue
//! - a two-state hidden Markov generator for synthetic input in [`generation`]

pub mod base;
pub mod errors;
pub mod evolution;
pub mod generation;
pub mod prelude;
pub mod simulation;

pub use base::{Nucleotide, Sequence, Window};
