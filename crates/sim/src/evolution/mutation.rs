//! Point substitutions and insertion/deletion events.
//!
//! ## Point Substitutions (Base Replacements)
//! Each base is independently replaced, with a small per-base probability, by
//! a base drawn uniformly from {A, C, G, T}. The draw may return the original
//! base; the position is still recorded as mutated.
//!
//! ## Insertions and Deletions (Indels)
//! A cursor walks the sequence. At every position a Bernoulli trial decides
//! whether an indel starts there; if so, insertion and deletion are equally
//! likely and the event length follows a Gamma distribution. Two presets
//! exist: small indels (Gamma(0.5, 50), mostly a few bases) and large indels
//! (Gamma(2, 300), hundreds of bases).

use log::trace;
use rand::Rng;

use super::sampling::{EventSize, check_probability};
use super::{Mutator, StageOutput};
use crate::base::{Nucleotide, Sequence};
pub use crate::errors::MutationError;

/// Per-base uniform substitution model.
#[derive(Debug, Clone)]
pub struct SubstitutionModel {
    rate: f64,
}

impl SubstitutionModel {
    pub const DEFAULT_RATE: f64 = 0.001;

    /// Create a substitution model.
    ///
    /// # Arguments
    /// * `rate` - Probability that any given base is replaced (0.0 to 1.0).
    pub fn new(rate: f64) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("substitution", rate)?,
        })
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Mutator for SubstitutionModel {
    fn name(&self) -> &'static str {
        "substitution"
    }

    /// Length is always preserved; untouched bases keep their marks.
    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput {
        let mut out = sequence.clone();
        let mut events = 0;
        for i in 0..out.len() {
            if rng.random_bool(self.rate) {
                out.substitute(i, Nucleotide::random(rng));
                events += 1;
            }
        }
        StageOutput::new(out, events)
    }
}

/// Which way an indel event went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

/// Cursor-scanning indel model.
///
/// Insertions keep the base under the cursor and follow it with `size`
/// random bases, which are not rescanned. Deletions drop exactly `size`
/// bases starting at the cursor, truncating at the end of the sequence.
#[derive(Debug, Clone)]
pub struct IndelModel {
    rate: f64,
    size: EventSize,
}

impl IndelModel {
    pub const DEFAULT_RATE: f64 = 0.0001;
    pub const SMALL_SHAPE: f64 = 0.5;
    pub const SMALL_SCALE: f64 = 50.0;
    pub const LARGE_SHAPE: f64 = 2.0;
    pub const LARGE_SCALE: f64 = 300.0;

    /// Create an indel model with a Gamma(shape, scale) event length.
    ///
    /// # Errors
    /// Returns an error if `rate` is outside `[0, 1]` or the Gamma
    /// parameters are not strictly positive.
    pub fn new(rate: f64, shape: f64, scale: f64) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("indel", rate)?,
            size: EventSize::gamma("indel", shape, scale)?,
        })
    }

    /// Small indels: Gamma(0.5, 50) lengths.
    pub fn small(rate: f64) -> Result<Self, MutationError> {
        Self::new(rate, Self::SMALL_SHAPE, Self::SMALL_SCALE)
    }

    /// Large indels: Gamma(2, 300) lengths.
    pub fn large(rate: f64) -> Result<Self, MutationError> {
        Self::new(rate, Self::LARGE_SHAPE, Self::LARGE_SCALE)
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn size(&self) -> &EventSize {
        &self.size
    }
}

impl Mutator for IndelModel {
    fn name(&self) -> &'static str {
        "indel"
    }

    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput {
        let len = sequence.len();
        let mut out = Sequence::with_capacity(len);
        let mut events = 0;

        // Bases in run_start..i are copied lazily in one slice.
        let mut run_start = 0;
        let mut i = 0;
        while i < len {
            if !rng.random_bool(self.rate) {
                i += 1;
                continue;
            }

            let kind = if rng.random_bool(0.5) {
                IndelKind::Insertion
            } else {
                IndelKind::Deletion
            };
            let size = self.size.sample(rng);
            trace!("indel {kind:?} of {size} bp at {i}");

            match kind {
                IndelKind::Insertion => {
                    out.extend_from(sequence, run_start..i + 1);
                    for _ in 0..size {
                        out.push_mutated(Nucleotide::random(rng));
                    }
                    i += 1;
                }
                IndelKind::Deletion => {
                    out.extend_from(sequence, run_start..i);
                    i = i.saturating_add(size).min(len);
                }
            }
            run_start = i;
            events += 1;
        }
        out.extend_from(sequence, run_start..len);

        StageOutput::new(out, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::str::FromStr;

    fn random_sequence(len: usize, seed: u64) -> Sequence {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Sequence::from_nucleotides((0..len).map(|_| Nucleotide::random(&mut rng)).collect())
    }

    #[test]
    fn test_substitution_invalid_rate() {
        assert!(SubstitutionModel::new(-0.1).is_err());
        assert!(SubstitutionModel::new(1.5).is_err());
        assert_eq!(
            SubstitutionModel::new(2.0).unwrap_err(),
            MutationError::InvalidProbability("substitution", 2.0)
        );
    }

    #[test]
    fn test_substitution_zero_rate() {
        let model = SubstitutionModel::new(0.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let seq = Sequence::from_str("acgtacgt").unwrap();
        let out = model.apply(&seq, &mut rng);

        assert_eq!(out.events, 0);
        assert_eq!(out.sequence, seq);
    }

    #[test]
    fn test_substitution_full_rate_marks_every_position() {
        let model = SubstitutionModel::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let seq = Sequence::from_str("ACGTACGT").unwrap();
        let out = model.apply(&seq, &mut rng);

        assert_eq!(out.events, 8);
        assert_eq!(out.sequence.len(), 8);
        assert_eq!(out.sequence.mutated_count(), 8);
        assert_ne!(out.sequence.marked(), seq.marked());
    }

    #[test]
    fn test_substitution_preserves_length() {
        let model = SubstitutionModel::new(0.3).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let seq = random_sequence(1000, 1);
        let out = model.apply(&seq, &mut rng);

        assert_eq!(out.sequence.len(), seq.len());
        assert_eq!(out.sequence.mutated_count(), out.events);
        // Roughly a quarter of replacements draw the original base back.
        let changed = seq
            .as_slice()
            .iter()
            .zip(out.sequence.as_slice())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed < out.events);
        assert!(out.events > 200 && out.events < 400);
    }

    #[test]
    fn test_substitution_keeps_existing_marks() {
        let model = SubstitutionModel::new(0.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let seq = Sequence::from_marked_str("acGTac").unwrap();
        assert_eq!(model.apply(&seq, &mut rng).sequence.marked(), "acGTac");
    }

    #[test]
    fn test_indel_presets() {
        let small = IndelModel::small(IndelModel::DEFAULT_RATE).unwrap();
        assert_eq!(small.size().shape(), 0.5);
        assert_eq!(small.size().scale(), 50.0);
        let large = IndelModel::large(IndelModel::DEFAULT_RATE).unwrap();
        assert_eq!(large.size().mean(), 600.0);
        assert!(IndelModel::new(0.1, 0.0, 1.0).is_err());
        assert!(IndelModel::new(1.1, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_indel_zero_rate() {
        let model = IndelModel::small(0.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let seq = random_sequence(500, 9);
        let out = model.apply(&seq, &mut rng);
        assert_eq!(out.events, 0);
        assert_eq!(out.sequence, seq);
    }

    #[test]
    fn test_indel_empty_sequence() {
        let model = IndelModel::large(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let out = model.apply(&Sequence::new(), &mut rng);
        assert!(out.sequence.is_empty());
        assert_eq!(out.events, 0);
    }

    #[test]
    fn test_indel_deletion_past_end_truncates() {
        // Large indels on a tiny sequence: any deletion overruns the end.
        let model = IndelModel::large(1.0).unwrap();
        for seed in 0..50 {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let seq = Sequence::from_str("acgtacgt").unwrap();
            let out = model.apply(&seq, &mut rng);
            // Untouched bases are always an in-order subsequence of the input.
            let mut input = seq.as_slice().iter();
            let kept = out
                .sequence
                .as_slice()
                .iter()
                .zip(out.sequence.mutation_mask())
                .filter(|(_, m)| !**m)
                .map(|(b, _)| *b);
            for base in kept {
                assert!(input.any(|b| *b == base));
            }
        }
    }

    #[test]
    fn test_indel_length_accounting() {
        let model = IndelModel::small(0.01).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let seq = random_sequence(10_000, 5);
        let out = model.apply(&seq, &mut rng);

        assert!(out.events > 0);
        let inserted = out.sequence.mutated_count();
        let kept = out.sequence.len() - inserted;
        // Deleted bases are the only ones missing from the unmarked remainder.
        assert!(kept <= seq.len());
        assert!(inserted > 0);
    }

    #[test]
    fn test_indel_deterministic_with_seed() {
        let model = IndelModel::small(0.05).unwrap();
        let seq = random_sequence(2000, 2);
        let a = model.apply(&seq, &mut Xoshiro256PlusPlus::seed_from_u64(99));
        let b = model.apply(&seq, &mut Xoshiro256PlusPlus::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
