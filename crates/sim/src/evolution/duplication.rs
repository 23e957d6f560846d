//! Tandem and dispersed duplications.
//!
//! Tandem duplications scan the sequence like the indel and inversion
//! operators: a triggered window is written out once and then repeated
//! `n_dup` more times right after itself. `n_dup` is `Poisson(lambda) + 1`,
//! drawn once per pass and shared by every event in that pass.
//!
//! Dispersed duplications are count driven: `floor(len * rate)` events, each
//! copying a random window to a random insertion point. Each event operates
//! on the output of the previous one.

use log::{debug, trace};
use rand::Rng;

use super::sampling::{EventSize, RepeatCount, check_probability, event_count};
use super::{Mutator, StageOutput};
use crate::base::{Sequence, Window};
use crate::errors::MutationError;

/// Per-position tandem duplication model.
#[derive(Debug, Clone)]
pub struct TandemDuplicationModel {
    rate: f64,
    size: EventSize,
    repeats: RepeatCount,
}

impl TandemDuplicationModel {
    pub const DEFAULT_RATE: f64 = 0.0001;
    pub const DEFAULT_SHAPE: f64 = 0.3;
    pub const DEFAULT_SCALE: f64 = 1000.0;
    pub const DEFAULT_REPEAT_LAMBDA: f64 = 8.0;

    pub fn new(
        rate: f64,
        shape: f64,
        scale: f64,
        repeat_lambda: f64,
    ) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("tandem duplication", rate)?,
            size: EventSize::gamma("tandem duplication", shape, scale)?,
            repeats: RepeatCount::poisson("tandem duplication", repeat_lambda)?,
        })
    }

    pub fn with_rate(rate: f64) -> Result<Self, MutationError> {
        Self::new(
            rate,
            Self::DEFAULT_SHAPE,
            Self::DEFAULT_SCALE,
            Self::DEFAULT_REPEAT_LAMBDA,
        )
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn size(&self) -> &EventSize {
        &self.size
    }

    #[inline]
    pub fn repeats(&self) -> &RepeatCount {
        &self.repeats
    }

    /// Run one pass with a fixed number of extra copies per event.
    ///
    /// Each triggered window `w` (truncated at the sequence end) is emitted
    /// `1 + n_dup` times, all copies marked, so every event grows the
    /// sequence by `|w| * n_dup`.
    pub fn apply_with_repeats<R: Rng + ?Sized>(
        &self,
        sequence: &Sequence,
        n_dup: usize,
        rng: &mut R,
    ) -> StageOutput {
        let len = sequence.len();
        let mut out = Sequence::with_capacity(len);
        let mut events = 0;

        let mut run_start = 0;
        let mut i = 0;
        while i < len {
            if !rng.random_bool(self.rate) {
                i += 1;
                continue;
            }
            let window = Window::new(i, self.size.sample(rng)).clamp(len);
            trace!("tandem duplication of {window} x{n_dup}");

            out.extend_from(sequence, run_start..i);
            for _ in 0..=n_dup {
                out.extend_mutated_from(sequence, window.range());
            }
            i = window.end();
            run_start = i;
            events += 1;
        }
        out.extend_from(sequence, run_start..len);

        StageOutput::new(out, events)
    }
}

impl Mutator for TandemDuplicationModel {
    fn name(&self) -> &'static str {
        "tandem duplication"
    }

    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput {
        let n_dup = self.repeats.sample(rng) + 1;
        debug!("tandem duplication pass with {n_dup} extra copies per event");
        self.apply_with_repeats(sequence, n_dup, rng)
    }
}

/// Event-count driven dispersed duplication model.
#[derive(Debug, Clone)]
pub struct DispersedDuplicationModel {
    rate: f64,
    size: EventSize,
}

impl DispersedDuplicationModel {
    pub const DEFAULT_RATE: f64 = 0.00001;
    pub const DEFAULT_SHAPE: f64 = 3.0;
    pub const DEFAULT_SCALE: f64 = 200.0;

    pub fn new(rate: f64, shape: f64, scale: f64) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("dispersed duplication", rate)?,
            size: EventSize::gamma("dispersed duplication", shape, scale)?,
        })
    }

    pub fn with_rate(rate: f64) -> Result<Self, MutationError> {
        Self::new(rate, Self::DEFAULT_SHAPE, Self::DEFAULT_SCALE)
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

impl Mutator for DispersedDuplicationModel {
    fn name(&self) -> &'static str {
        "dispersed duplication"
    }

    /// A pass with zero events returns the input unchanged.
    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput {
        let events = event_count(sequence.len(), self.rate);
        if events == 0 {
            return StageOutput::unchanged(sequence);
        }

        // Two buffers per stage, swapped after every event.
        let mut current = sequence.clone();
        let mut scratch = Sequence::with_capacity(sequence.len());
        for _ in 0..events {
            let len = current.len();
            let seed = rng.random_range(0..len);
            let target = rng.random_range(0..len);
            let size = self.size.sample(rng);
            duplicate_window_into(&current, Window::new(seed, size), target, &mut scratch);
            std::mem::swap(&mut current, &mut scratch);
        }

        StageOutput::new(current, events)
    }
}

/// Copy `source` (truncated at the sequence end) and splice the marked copy
/// in before position `target`. The original window is left in place.
pub fn duplicate_window(sequence: &Sequence, source: Window, target: usize) -> Sequence {
    let mut out = Sequence::with_capacity(sequence.len() + source.size.min(sequence.len()));
    duplicate_window_into(sequence, source, target, &mut out);
    out
}

/// Same as [`duplicate_window`], writing into `out` after clearing it.
pub fn duplicate_window_into(sequence: &Sequence, source: Window, target: usize, out: &mut Sequence) {
    let len = sequence.len();
    let source = source.clamp(len);
    let target = target.min(len);
    trace!("dispersed duplication of {source} to {target}");

    out.clear();
    out.extend_from(sequence, 0..target);
    out.extend_mutated_from(sequence, source.range());
    out.extend_from(sequence, target..len);
}
