//! Mutation parameters and run configuration.
//!
//! This module provides the serde-backed parameter structures for every
//! operator in the pipeline. A [`Configuration`] can be written to and read
//! from JSON to fully reproduce a run (given its seed).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{ConfigError, MutationError};
use crate::evolution::{
    DispersedDuplicationModel, IndelModel, InversionModel, NonReciprocalTranslocationModel,
    ReciprocalTranslocationModel, SubstitutionModel, TandemDuplicationModel,
};

/// The master configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Optional RNG seed for reproducibility
    pub seed: Option<u64>,
    /// Per-operator parameters
    pub mutation: MutationConfig,
}

impl Configuration {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.mutation.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Substitution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionConfig {
    /// Per-base replacement probability
    pub rate: f64,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            rate: SubstitutionModel::DEFAULT_RATE,
        }
    }
}

/// Trigger probability plus a Gamma(shape, scale) event size.
///
/// Used by every operator whose events only need a size draw. Sections in a
/// configuration file must be given in full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaEventConfig {
    /// Per-position trigger probability, or per-base event density for the
    /// count-driven operators
    pub rate: f64,
    /// Gamma shape parameter for event size
    pub shape: f64,
    /// Gamma scale parameter for event size
    pub scale: f64,
}

impl GammaEventConfig {
    pub const fn new(rate: f64, shape: f64, scale: f64) -> Self {
        Self { rate, shape, scale }
    }

    /// Same distribution, different rate.
    pub const fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }
}

/// Tandem duplication parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TandemDuplicationConfig {
    pub rate: f64,
    pub shape: f64,
    pub scale: f64,
    /// Poisson mean for the number of extra copies (plus one)
    pub repeat_lambda: f64,
}

impl Default for TandemDuplicationConfig {
    fn default() -> Self {
        Self {
            rate: TandemDuplicationModel::DEFAULT_RATE,
            shape: TandemDuplicationModel::DEFAULT_SHAPE,
            scale: TandemDuplicationModel::DEFAULT_SCALE,
            repeat_lambda: TandemDuplicationModel::DEFAULT_REPEAT_LAMBDA,
        }
    }
}

/// Parameters for every mutation operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub substitution: SubstitutionConfig,
    pub small_indel: GammaEventConfig,
    pub large_indel: GammaEventConfig,
    pub inversion: GammaEventConfig,
    pub tandem_duplication: TandemDuplicationConfig,
    pub dispersed_duplication: GammaEventConfig,
    pub nr_translocation: GammaEventConfig,
    pub r_translocation: GammaEventConfig,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            substitution: SubstitutionConfig::default(),
            small_indel: GammaEventConfig::new(
                IndelModel::DEFAULT_RATE,
                IndelModel::SMALL_SHAPE,
                IndelModel::SMALL_SCALE,
            ),
            large_indel: GammaEventConfig::new(
                IndelModel::DEFAULT_RATE,
                IndelModel::LARGE_SHAPE,
                IndelModel::LARGE_SCALE,
            ),
            inversion: GammaEventConfig::new(
                InversionModel::DEFAULT_RATE,
                InversionModel::DEFAULT_SHAPE,
                InversionModel::DEFAULT_SCALE,
            ),
            tandem_duplication: TandemDuplicationConfig::default(),
            dispersed_duplication: GammaEventConfig::new(
                DispersedDuplicationModel::DEFAULT_RATE,
                DispersedDuplicationModel::DEFAULT_SHAPE,
                DispersedDuplicationModel::DEFAULT_SCALE,
            ),
            nr_translocation: GammaEventConfig::new(
                NonReciprocalTranslocationModel::DEFAULT_RATE,
                NonReciprocalTranslocationModel::DEFAULT_SHAPE,
                NonReciprocalTranslocationModel::DEFAULT_SCALE,
            ),
            r_translocation: GammaEventConfig::new(
                ReciprocalTranslocationModel::DEFAULT_RATE,
                ReciprocalTranslocationModel::DEFAULT_SHAPE,
                ReciprocalTranslocationModel::DEFAULT_SCALE,
            ),
        }
    }
}

impl MutationConfig {
    /// Check every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), MutationError> {
        self.build().map(|_| ())
    }

    /// Build every operator model from these parameters.
    pub fn build(&self) -> Result<OperatorSet, MutationError> {
        let t = &self.tandem_duplication;
        Ok(OperatorSet {
            substitution: SubstitutionModel::new(self.substitution.rate)?,
            small_indel: IndelModel::new(
                self.small_indel.rate,
                self.small_indel.shape,
                self.small_indel.scale,
            )?,
            large_indel: IndelModel::new(
                self.large_indel.rate,
                self.large_indel.shape,
                self.large_indel.scale,
            )?,
            inversion: InversionModel::new(
                self.inversion.rate,
                self.inversion.shape,
                self.inversion.scale,
            )?,
            tandem_duplication: TandemDuplicationModel::new(
                t.rate,
                t.shape,
                t.scale,
                t.repeat_lambda,
            )?,
            dispersed_duplication: DispersedDuplicationModel::new(
                self.dispersed_duplication.rate,
                self.dispersed_duplication.shape,
                self.dispersed_duplication.scale,
            )?,
            nr_translocation: NonReciprocalTranslocationModel::new(
                self.nr_translocation.rate,
                self.nr_translocation.shape,
                self.nr_translocation.scale,
            )?,
            r_translocation: ReciprocalTranslocationModel::new(
                self.r_translocation.rate,
                self.r_translocation.shape,
                self.r_translocation.scale,
            )?,
        })
    }

    /// Configuration with every trigger probability set to `rate`.
    pub fn with_uniform_rate(rate: f64) -> Self {
        let base = Self::default();
        Self {
            substitution: SubstitutionConfig { rate },
            small_indel: base.small_indel.with_rate(rate),
            large_indel: base.large_indel.with_rate(rate),
            inversion: base.inversion.with_rate(rate),
            tandem_duplication: TandemDuplicationConfig {
                rate,
                ..base.tandem_duplication
            },
            dispersed_duplication: base.dispersed_duplication.with_rate(rate),
            nr_translocation: base.nr_translocation.with_rate(rate),
            r_translocation: base.r_translocation.with_rate(rate),
        }
    }
}

/// Validated operator models, one per operator code.
#[derive(Debug, Clone)]
pub struct OperatorSet {
    pub substitution: SubstitutionModel,
    pub small_indel: IndelModel,
    pub large_indel: IndelModel,
    pub inversion: InversionModel,
    pub tandem_duplication: TandemDuplicationModel,
    pub dispersed_duplication: DispersedDuplicationModel,
    pub nr_translocation: NonReciprocalTranslocationModel,
    pub r_translocation: ReciprocalTranslocationModel,
}
