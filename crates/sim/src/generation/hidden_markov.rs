//! Two-state hidden Markov sequence generator.
//!
//! State `A` emits bases uniformly. State `B` emits with probabilities that
//! depend on the previously emitted base, producing AT-rich stretches. Both
//! states are sticky (self-transition 0.999), so the output alternates
//! between long uniform and long biased segments.

use rand::Rng;
use std::fmt;

use crate::base::{Nucleotide, Sequence};
use crate::errors::GeneratorError;

const ROW_TOLERANCE: f64 = 1e-9;

/// Hidden state of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiddenState {
    A = 0,
    B = 1,
}

impl HiddenState {
    pub const ALL: [HiddenState; 2] = [HiddenState::A, HiddenState::B];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

impl fmt::Display for HiddenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Row-stochastic transition matrix, indexed `[from][to]`.
pub type TransitionMatrix = [[f64; 2]; 2];

/// Emission probabilities, indexed `[state][previous base][next base]` with
/// bases in A, C, G, T order.
pub type EmissionMatrix = [[[f64; 4]; 4]; 2];

/// Output of [`HiddenMarkovModel::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSequence {
    pub sequence: Sequence,
    /// `hidden[i]` is the state that emitted base `i`.
    pub hidden: Vec<HiddenState>,
}

impl GeneratedSequence {
    /// Hidden path as a string of `A`/`B`.
    pub fn hidden_path(&self) -> String {
        self.hidden.iter().map(|s| s.to_char()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HiddenMarkovModel {
    transition: TransitionMatrix,
    emission: EmissionMatrix,
}

impl Default for HiddenMarkovModel {
    fn default() -> Self {
        const UNIFORM: [f64; 4] = [0.25; 4];
        Self {
            transition: [[0.999, 0.001], [0.001, 0.999]],
            emission: [
                [UNIFORM; 4],
                [
                    // previous A: mostly T
                    [0.1, 0.1, 0.1, 0.7],
                    // previous C
                    [0.4, 0.1, 0.1, 0.4],
                    // previous G
                    [0.4, 0.1, 0.1, 0.4],
                    // previous T: mostly A
                    [0.7, 0.1, 0.1, 0.1],
                ],
            ],
        }
    }
}

impl HiddenMarkovModel {
    /// Build a model from custom matrices.
    ///
    /// # Errors
    /// Every row must hold finite, non-negative values summing to 1.
    pub fn new(
        transition: TransitionMatrix,
        emission: EmissionMatrix,
    ) -> Result<Self, GeneratorError> {
        for (from, row) in transition.iter().enumerate() {
            check_row(row, || format!("transition row {}", HiddenState::ALL[from]))?;
        }
        for (state, rows) in emission.iter().enumerate() {
            for (prev, row) in rows.iter().enumerate() {
                check_row(row, || {
                    format!(
                        "emission row for state {} after {}",
                        HiddenState::ALL[state],
                        Nucleotide::ALL[prev]
                    )
                })?;
            }
        }
        Ok(Self {
            transition,
            emission,
        })
    }

    pub fn transition(&self) -> &TransitionMatrix {
        &self.transition
    }

    pub fn emission(&self) -> &EmissionMatrix {
        &self.emission
    }

    /// Generate `length` bases.
    ///
    /// The initial state and the first base are uniform. Each following
    /// step transitions the hidden state first and then emits a base
    /// conditioned on the new state and the previous base.
    pub fn generate<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> GeneratedSequence {
        let mut sequence = Sequence::with_capacity(length);
        let mut hidden = Vec::with_capacity(length);
        if length == 0 {
            return GeneratedSequence { sequence, hidden };
        }

        let mut state = if rng.random_bool(0.5) {
            HiddenState::A
        } else {
            HiddenState::B
        };
        let mut prev = Nucleotide::random(rng);
        sequence.push(prev);
        hidden.push(state);

        for _ in 1..length {
            state = HiddenState::ALL[sample_index(&self.transition[state.index()], rng)];
            let row = &self.emission[state.index()][prev.to_index() as usize];
            prev = Nucleotide::ALL[sample_index(row, rng)];
            sequence.push(prev);
            hidden.push(state);
        }

        GeneratedSequence { sequence, hidden }
    }
}

fn check_row(row: &[f64], what: impl Fn() -> String) -> Result<(), GeneratorError> {
    if row.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(GeneratorError::InvalidMatrix(format!(
            "{} has a negative or non-finite entry",
            what()
        )));
    }
    let sum: f64 = row.iter().sum();
    if (sum - 1.0).abs() > ROW_TOLERANCE {
        return Err(GeneratorError::InvalidMatrix(format!(
            "{} sums to {sum}, expected 1",
            what()
        )));
    }
    Ok(())
}

/// Inverse-CDF draw from a probability row.
fn sample_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.random();
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if u < acc {
            return i;
        }
    }
    // Rounding can leave the cumulative sum just short of 1.
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}
