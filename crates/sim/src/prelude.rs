//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use variantize_sim::prelude::*;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let pipeline = Pipeline::new(MutationSpec::parse("sv"), &MutationConfig::default()).unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
//! let out = pipeline.mutate_record("acgtacgt", &mut rng).unwrap();
//! assert_eq!(out.sequence.len(), 8);
//! ```

pub use crate::base::{Nucleotide, Sequence, Window};
pub use crate::errors;
pub use crate::evolution::{Mutator, StageOutput};
pub use crate::generation::{GeneratedSequence, HiddenMarkovModel, HiddenState};
pub use crate::simulation::{
    Configuration, MutationConfig, MutationSpec, Operator, Pipeline, PipelineOutput,
    rng_from_seed,
};
