//! Base types for sequence representation.
//!
//! This module provides the foundational types for representing nucleotides,
//! sequences with their mutation marks, and windows into them.

mod nucleotide;
mod sequence;
mod window;

pub use nucleotide::Nucleotide;
pub use sequence::Sequence;
pub use window::Window;
