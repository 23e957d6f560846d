//! Inversions: a window replaced by its reverse complement.

use log::trace;
use rand::Rng;

use super::sampling::{EventSize, check_probability};
use super::{Mutator, StageOutput};
use crate::base::{Sequence, Window};
use crate::errors::MutationError;

/// Per-position inversion model with Gamma(2, 300) window lengths by default.
///
/// A triggered window that runs past the end of the sequence is truncated,
/// so the output always has the input's length.
#[derive(Debug, Clone)]
pub struct InversionModel {
    rate: f64,
    size: EventSize,
}

impl InversionModel {
    pub const DEFAULT_RATE: f64 = 0.0001;
    pub const DEFAULT_SHAPE: f64 = 2.0;
    pub const DEFAULT_SCALE: f64 = 300.0;

    pub fn new(rate: f64, shape: f64, scale: f64) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("inversion", rate)?,
            size: EventSize::gamma("inversion", shape, scale)?,
        })
    }

    /// Inversion model with the default window length distribution.
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

impl Mutator for InversionModel {
    fn name(&self) -> &'static str {
        "inversion"
    }

    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput {
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
            trace!("inversion of {window}");

            out.extend_from(sequence, run_start..i);
            out.extend_reverse_complement_from(sequence, window.range());
            i = window.end();
            run_start = i;
            events += 1;
        }
        out.extend_from(sequence, run_start..len);

        StageOutput::new(out, events)
    }
}

/// Invert a single window of `sequence`, truncating it at the sequence end.
pub fn invert_window(sequence: &Sequence, window: Window) -> Sequence {
    let window = window.clamp(sequence.len());
    let mut out = Sequence::with_capacity(sequence.len());
    out.extend_from(sequence, 0..window.start);
    out.extend_reverse_complement_from(sequence, window.range());
    out.extend_from(sequence, window.end()..sequence.len());
    out
}
