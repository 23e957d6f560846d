//! Evolution module providing the variant generators.
//!
//! Every operator is a pure function of an input [`Sequence`] and a random
//! source, returning a freshly built sequence:
//! - **Point and small-scale**: substitutions and indels ([`mutation`])
//! - **In-place rearrangements**: inversions ([`inversion`])
//! - **Copy-number changes**: tandem and dispersed duplications ([`duplication`])
//! - **Relocations**: non-reciprocal and reciprocal translocations ([`translocation`])

pub mod duplication;
pub mod inversion;
pub mod mutation;
pub mod sampling;
pub mod translocation;

use rand::Rng;

use crate::base::Sequence;

pub use duplication::{DispersedDuplicationModel, TandemDuplicationModel};
pub use inversion::InversionModel;
pub use mutation::{IndelModel, SubstitutionModel};
pub use sampling::{EventSize, RepeatCount};
pub use translocation::{NonReciprocalTranslocationModel, ReciprocalTranslocationModel};

/// Result of running one operator over a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    /// The mutated sequence, owned by the caller.
    pub sequence: Sequence,
    /// Number of events the operator applied.
    pub events: usize,
}

impl StageOutput {
    pub fn new(sequence: Sequence, events: usize) -> Self {
        Self { sequence, events }
    }

    /// Output for a pass that changed nothing.
    pub fn unchanged(sequence: &Sequence) -> Self {
        Self {
            sequence: sequence.clone(),
            events: 0,
        }
    }
}

/// A sequence transformer driven by an explicit random source.
///
/// Implementations never modify their input; the returned sequence is a new
/// buffer whose freshly produced positions carry the mutation mark.
pub trait Mutator {
    /// Short human-readable name used in diagnostics.
    fn name(&self) -> &'static str;

    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput;
}
