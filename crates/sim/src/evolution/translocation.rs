//! Non-reciprocal and reciprocal translocations.
//!
//! Both operators are count driven (`floor(len * rate)` events) and keep the
//! sequence length unchanged: a non-reciprocal event cuts a window out and
//! pastes it at another locus, a reciprocal event swaps two windows.

use log::{debug, trace};
use rand::Rng;

use super::sampling::{EventSize, check_probability, event_count};
use super::{Mutator, StageOutput};
use crate::base::{Sequence, Window};
use crate::errors::MutationError;

/// Cut-and-paste translocation of one window.
#[derive(Debug, Clone)]
pub struct NonReciprocalTranslocationModel {
    rate: f64,
    size: EventSize,
}

impl NonReciprocalTranslocationModel {
    pub const DEFAULT_RATE: f64 = 0.00001;
    pub const DEFAULT_SHAPE: f64 = 3.0;
    pub const DEFAULT_SCALE: f64 = 1000.0;

    pub fn new(rate: f64, shape: f64, scale: f64) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("non-reciprocal translocation", rate)?,
            size: EventSize::gamma("non-reciprocal translocation", shape, scale)?,
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

impl Mutator for NonReciprocalTranslocationModel {
    fn name(&self) -> &'static str {
        "non-reciprocal translocation"
    }

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
            let size = self.size.sample(rng);
            let seed = rng.random_range(0..len);
            let target = rng.random_range(0..len);
            move_window_into(&current, Window::new(seed, size), target, &mut scratch);
            std::mem::swap(&mut current, &mut scratch);
        }

        StageOutput::new(current, events)
    }
}

/// Move `source` so that it starts where the base at `target` used to be,
/// closing the gap it leaves behind.
///
/// The window is first clamped to `min(size, |seed - target|, len - seed)`,
/// so it never overlaps the target locus or runs past the end. `seed ==
/// target` leaves the sequence unchanged.
pub fn move_window(sequence: &Sequence, source: Window, target: usize) -> Sequence {
    let mut out = Sequence::with_capacity(sequence.len());
    move_window_into(sequence, source, target, &mut out);
    out
}

/// Same as [`move_window`], writing into `out` after clearing it.
pub fn move_window_into(sequence: &Sequence, source: Window, target: usize, out: &mut Sequence) {
    let len = sequence.len();
    let seed = source.start.min(len);
    let target = target.min(len);
    let size = source.size.min(seed.abs_diff(target)).min(len - seed);
    let moved = Window::new(seed, size);
    trace!("non-reciprocal translocation of {moved} to {target}");

    out.clear();
    if target < seed {
        out.extend_from(sequence, 0..target);
        out.extend_mutated_from(sequence, moved.range());
        out.extend_from(sequence, target..seed);
        out.extend_from(sequence, moved.end()..len);
    } else if seed < target {
        out.extend_from(sequence, 0..seed);
        out.extend_from(sequence, moved.end()..target);
        out.extend_mutated_from(sequence, moved.range());
        out.extend_from(sequence, target..len);
    } else {
        out.extend_from(sequence, 0..len);
    }
}

/// Swap of two windows between loci.
#[derive(Debug, Clone)]
pub struct ReciprocalTranslocationModel {
    rate: f64,
    size: EventSize,
}

impl ReciprocalTranslocationModel {
    pub const DEFAULT_RATE: f64 = 0.00001;
    pub const DEFAULT_SHAPE: f64 = 3.0;
    pub const DEFAULT_SCALE: f64 = 1000.0;

    pub fn new(rate: f64, shape: f64, scale: f64) -> Result<Self, MutationError> {
        Ok(Self {
            rate: check_probability("reciprocal translocation", rate)?,
            size: EventSize::gamma("reciprocal translocation", shape, scale)?,
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

impl Mutator for ReciprocalTranslocationModel {
    fn name(&self) -> &'static str {
        "reciprocal translocation"
    }

    fn apply<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> StageOutput {
        let events = event_count(sequence.len(), self.rate);
        if events == 0 {
            return StageOutput::unchanged(sequence);
        }

        let mut current = sequence.clone();
        let mut scratch = Sequence::with_capacity(sequence.len());
        for _ in 0..events {
            let len = current.len();
            let seed = rng.random_range(0..len);
            let target = rng.random_range(0..len);
            let seed_size = self.size.sample(rng);
            let target_size = self.size.sample(rng);
            swap_windows_into(
                &current,
                Window::new(seed, seed_size),
                Window::new(target, target_size),
                &mut scratch,
            );
            std::mem::swap(&mut current, &mut scratch);
        }

        StageOutput::new(current, events)
    }
}

/// Exchange the contents of two windows; both land marked.
///
/// The window at the lower locus is clamped to end before the higher locus,
/// and the window at the higher locus is clamped to the sequence end. The
/// two windows therefore never overlap and the length is preserved. Windows
/// with the same start leave the sequence unchanged.
pub fn swap_windows(sequence: &Sequence, a: Window, b: Window) -> Sequence {
    let mut out = Sequence::with_capacity(sequence.len());
    swap_windows_into(sequence, a, b, &mut out);
    out
}

/// Same as [`swap_windows`], writing into `out` after clearing it.
pub fn swap_windows_into(sequence: &Sequence, a: Window, b: Window, out: &mut Sequence) {
    let len = sequence.len();
    let a = Window::new(a.start.min(len), a.size);
    let b = Window::new(b.start.min(len), b.size);
    out.clear();
    if a.start == b.start {
        out.extend_from(sequence, 0..len);
        return;
    }

    let (lo, hi) = if a.start < b.start { (a, b) } else { (b, a) };
    let lo_clamped = Window::new(lo.start, lo.size.min(hi.start - lo.start));
    let hi_clamped = hi.clamp(len);
    if lo_clamped != lo || hi_clamped != hi {
        debug!(
            "reciprocal translocation windows clamped: {lo} -> {lo_clamped}, {hi} -> {hi_clamped}"
        );
    }
    trace!("reciprocal translocation swapping {lo_clamped} and {hi_clamped}");

    out.extend_from(sequence, 0..lo_clamped.start);
    out.extend_mutated_from(sequence, hi_clamped.range());
    out.extend_from(sequence, lo_clamped.end()..hi_clamped.start);
    out.extend_mutated_from(sequence, lo_clamped.range());
    out.extend_from(sequence, hi_clamped.end()..len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Nucleotide;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::str::FromStr;

    fn random_sequence(len: usize, seed: u64) -> Sequence {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Sequence::from_nucleotides((0..len).map(|_| Nucleotide::random(&mut rng)).collect())
    }

    fn base_counts(seq: &Sequence) -> [usize; 4] {
        let mut counts = [0; 4];
        for b in seq.as_slice() {
            counts[b.to_index() as usize] += 1;
        }
        counts
    }

    #[test]
    fn test_move_window_backward() {
        let seq = Sequence::from_str("aaaaccggtt").unwrap();
        // cc at 4..6 moves in front of position 1.
        let out = move_window(&seq, Window::new(4, 2), 1);
        assert_eq!(out.marked(), "aCCaaaggtt");
    }

    #[test]
    fn test_move_window_forward() {
        let seq = Sequence::from_str("ccaaaagg").unwrap();
        // cc at 0..2 moves to just before position 6.
        let out = move_window(&seq, Window::new(0, 2), 6);
        assert_eq!(out.marked(), "aaaaCCgg");
    }

    #[test]
    fn test_move_window_clamps_to_distance() {
        let seq = Sequence::from_str("acgtacgt").unwrap();
        // size clamps to |2 - 5| = 3
        let out = move_window(&seq, Window::new(2, 100), 5);
        assert_eq!(out.marked(), "acGTAcgt");
    }

    #[test]
    fn test_move_window_same_locus_is_noop() {
        let seq = Sequence::from_str("acgtacgt").unwrap();
        assert_eq!(move_window(&seq, Window::new(3, 2), 3), seq);
    }

    #[test]
    fn test_swap_windows_backward() {
        let seq = Sequence::from_str("aaccggttaa").unwrap();
        // target window cc (2..4) and seed window tt (6..8)
        let out = swap_windows(&seq, Window::new(6, 2), Window::new(2, 2));
        assert_eq!(out.marked(), "aaTTggCCaa");
    }

    #[test]
    fn test_swap_windows_forward_is_symmetric() {
        let seq = Sequence::from_str("aaccggttaa").unwrap();
        let out = swap_windows(&seq, Window::new(2, 2), Window::new(6, 2));
        assert_eq!(out.marked(), "aaTTggCCaa");
    }

    #[test]
    fn test_swap_windows_unequal_sizes() {
        let seq = Sequence::from_str("acccgtttta").unwrap();
        let out = swap_windows(&seq, Window::new(1, 3), Window::new(5, 4));
        assert_eq!(out.marked(), "aTTTTgCCCa");
        assert_eq!(out.len(), seq.len());
    }

    #[test]
    fn test_swap_windows_clamps_overlap_and_end() {
        let seq = Sequence::from_str("aaccggtt").unwrap();
        // Lower window would overlap the higher one; the higher one runs off
        // the end. Lower clamps to 2..6, higher to 6..8.
        let out = swap_windows(&seq, Window::new(2, 10), Window::new(6, 10));
        assert_eq!(out.marked(), "aaTTCCGG");
    }

    #[test]
    fn test_swap_windows_same_locus_is_noop() {
        let seq = Sequence::from_str("acgtacgt").unwrap();
        assert_eq!(swap_windows(&seq, Window::new(2, 3), Window::new(2, 1)), seq);
    }

    #[test]
    fn test_into_variants_overwrite_buffer() {
        let seq = Sequence::from_str("aaccggttaa").unwrap();
        let mut out = Sequence::from_marked_str("TTTTTTTTTTTTTTTT").unwrap();

        swap_windows_into(&seq, Window::new(6, 2), Window::new(2, 2), &mut out);
        assert_eq!(out.marked(), "aaTTggCCaa");

        move_window_into(&seq, Window::new(2, 2), 6, &mut out);
        assert_eq!(out, move_window(&seq, Window::new(2, 2), 6));
        assert_eq!(out.len(), seq.len());

        // Same locus copies the input unchanged.
        move_window_into(&seq, Window::new(3, 2), 3, &mut out);
        assert_eq!(out, seq);
        swap_windows_into(&seq, Window::new(4, 1), Window::new(4, 3), &mut out);
        assert_eq!(out, seq);
    }

    #[test]
    fn test_nr_translocation_zero_events() {
        let model = NonReciprocalTranslocationModel::with_rate(0.00001).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let seq = random_sequence(5000, 1);
        let out = model.apply(&seq, &mut rng);
        assert_eq!(out.events, 0);
        assert_eq!(out.sequence, seq);
    }

    #[test]
    fn test_nr_translocation_preserves_composition() {
        let model = NonReciprocalTranslocationModel::new(0.001, 3.0, 50.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let seq = random_sequence(10_000, 2);
        let out = model.apply(&seq, &mut rng);
        assert_eq!(out.events, 10);
        assert_eq!(out.sequence.len(), seq.len());
        assert_eq!(base_counts(&out.sequence), base_counts(&seq));
    }

    #[test]
    fn test_r_translocation_preserves_composition() {
        let model = ReciprocalTranslocationModel::new(0.001, 3.0, 1000.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let seq = random_sequence(10_000, 3);
        let out = model.apply(&seq, &mut rng);
        assert_eq!(out.events, 10);
        assert_eq!(out.sequence.len(), seq.len());
        assert_eq!(base_counts(&out.sequence), base_counts(&seq));
        assert!(out.sequence.mutated_count() > 0);
    }

    #[test]
    fn test_translocations_reject_bad_rate() {
        assert!(NonReciprocalTranslocationModel::with_rate(-1.0).is_err());
        assert!(ReciprocalTranslocationModel::with_rate(3.0).is_err());
    }
}
