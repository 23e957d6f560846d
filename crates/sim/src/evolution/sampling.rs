//! Shared sampling helpers for the mutation operators.

use rand::Rng;
use rand_distr::{Distribution, Gamma, Poisson};

use crate::errors::MutationError;

/// Gamma-distributed event length.
///
/// Samples are rounded up and never smaller than one base, so every event
/// touches at least one position.
#[derive(Debug, Clone)]
pub struct EventSize {
    shape: f64,
    scale: f64,
    dist: Gamma<f64>,
}

impl EventSize {
    /// Gamma(shape, scale) size distribution.
    ///
    /// # Errors
    /// Returns `InvalidDistribution` if `shape` or `scale` is not strictly
    /// positive and finite.
    pub fn gamma(name: &'static str, shape: f64, scale: f64) -> Result<Self, MutationError> {
        if !shape.is_finite() || !scale.is_finite() {
            return Err(MutationError::InvalidDistribution(
                name,
                format!("shape={shape}, scale={scale} must be finite"),
            ));
        }
        let dist = Gamma::new(shape, scale)
            .map_err(|e| MutationError::InvalidDistribution(name, e.to_string()))?;
        Ok(Self { shape, scale, dist })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Mean of the underlying (unrounded) distribution.
    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    /// Draw `ceil(Gamma(shape, scale))`, at least 1.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let x: f64 = self.dist.sample(rng);
        (x.ceil() as usize).max(1)
    }
}

/// Poisson-distributed repeat count for tandem duplications.
///
/// A rate of zero is accepted and always yields zero extra repeats.
#[derive(Debug, Clone)]
pub struct RepeatCount {
    lambda: f64,
    dist: Option<Poisson<f64>>,
}

impl RepeatCount {
    pub fn poisson(name: &'static str, lambda: f64) -> Result<Self, MutationError> {
        if lambda == 0.0 {
            return Ok(Self { lambda, dist: None });
        }
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(MutationError::InvalidDistribution(
                name,
                format!("lambda={lambda} must be finite and non-negative"),
            ));
        }
        let dist = Poisson::new(lambda)
            .map_err(|e| MutationError::InvalidDistribution(name, e.to_string()))?;
        Ok(Self {
            lambda,
            dist: Some(dist),
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match &self.dist {
            Some(p) => p.sample(rng) as usize,
            None => 0,
        }
    }
}

/// Validate a per-position or per-base trigger probability.
#[inline]
pub fn check_probability(name: &'static str, p: f64) -> Result<f64, MutationError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(MutationError::InvalidProbability(name, p));
    }
    Ok(p)
}

/// Number of events for the count-driven operators: `floor(len * rate)`.
#[inline]
pub fn event_count(len: usize, rate: f64) -> usize {
    (len as f64 * rate).floor() as usize
}
