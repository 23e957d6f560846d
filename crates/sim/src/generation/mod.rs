//! Synthetic sequence generation.

pub mod hidden_markov;

pub use hidden_markov::{
    EmissionMatrix, GeneratedSequence, HiddenMarkovModel, HiddenState, TransitionMatrix,
};
