//! Ordered mutation pipeline driven by single-character operator codes.

use log::{debug, warn};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::configs::{MutationConfig, OperatorSet};
use crate::base::Sequence;
use crate::errors::{InvalidSequence, MutationError};
use crate::evolution::{Mutator, StageOutput};

/// One of the eight variant generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Substitution,
    SmallIndel,
    LargeIndel,
    Inversion,
    TandemDuplication,
    DispersedDuplication,
    NonReciprocalTranslocation,
    ReciprocalTranslocation,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Substitution,
        Operator::SmallIndel,
        Operator::LargeIndel,
        Operator::Inversion,
        Operator::TandemDuplication,
        Operator::DispersedDuplication,
        Operator::NonReciprocalTranslocation,
        Operator::ReciprocalTranslocation,
    ];

    /// Look up an operator by its code. Both `l` and `I` select large indels.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            's' => Some(Self::Substitution),
            'i' => Some(Self::SmallIndel),
            'l' | 'I' => Some(Self::LargeIndel),
            'v' => Some(Self::Inversion),
            't' => Some(Self::TandemDuplication),
            'd' => Some(Self::DispersedDuplication),
            'n' => Some(Self::NonReciprocalTranslocation),
            'r' => Some(Self::ReciprocalTranslocation),
            _ => None,
        }
    }

    /// Canonical code.
    pub fn code(self) -> char {
        match self {
            Self::Substitution => 's',
            Self::SmallIndel => 'i',
            Self::LargeIndel => 'l',
            Self::Inversion => 'v',
            Self::TandemDuplication => 't',
            Self::DispersedDuplication => 'd',
            Self::NonReciprocalTranslocation => 'n',
            Self::ReciprocalTranslocation => 'r',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Substitution => "substitution",
            Self::SmallIndel => "small indel",
            Self::LargeIndel => "large indel",
            Self::Inversion => "inversion",
            Self::TandemDuplication => "tandem duplication",
            Self::DispersedDuplication => "dispersed duplication",
            Self::NonReciprocalTranslocation => "non-reciprocal translocation",
            Self::ReciprocalTranslocation => "reciprocal translocation",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A parsed operator code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Apply(Operator),
    /// A code with no operator behind it. Reported when the pipeline is
    /// built and skipped on every run.
    Unknown(char),
}

impl Step {
    pub fn from_code(code: char) -> Self {
        Operator::from_code(code).map_or(Self::Unknown(code), Self::Apply)
    }

    pub fn code(self) -> char {
        match self {
            Self::Apply(op) => op.code(),
            Self::Unknown(c) => c,
        }
    }
}

/// Ordered list of steps, e.g. `"svt"` for substitutions, then inversions,
/// then tandem duplications. Repeated codes run repeatedly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationSpec {
    steps: Vec<Step>,
}

impl MutationSpec {
    /// Parse a code string. Never fails: unrecognized codes are kept as
    /// [`Step::Unknown`].
    pub fn parse(codes: &str) -> Self {
        Self {
            steps: codes.chars().map(Step::from_code).collect(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Codes that do not name any operator, in order of appearance.
    pub fn unknown_codes(&self) -> Vec<char> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Unknown(c) => Some(*c),
                Step::Apply(_) => None,
            })
            .collect()
    }
}

impl FromStr for MutationSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for MutationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}", step.code())?;
        }
        Ok(())
    }
}

impl OperatorSet {
    /// Run a single operator.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        operator: Operator,
        sequence: &Sequence,
        rng: &mut R,
    ) -> StageOutput {
        match operator {
            Operator::Substitution => self.substitution.apply(sequence, rng),
            Operator::SmallIndel => self.small_indel.apply(sequence, rng),
            Operator::LargeIndel => self.large_indel.apply(sequence, rng),
            Operator::Inversion => self.inversion.apply(sequence, rng),
            Operator::TandemDuplication => self.tandem_duplication.apply(sequence, rng),
            Operator::DispersedDuplication => self.dispersed_duplication.apply(sequence, rng),
            Operator::NonReciprocalTranslocation => self.nr_translocation.apply(sequence, rng),
            Operator::ReciprocalTranslocation => self.r_translocation.apply(sequence, rng),
        }
    }
}

/// What one stage did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub operator: Operator,
    pub events: usize,
    /// Sequence length after the stage.
    pub length: usize,
}

/// Final sequence of a pipeline run plus per-stage bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// The mutated sequence; its mask records every position produced by an
    /// operator during this run.
    pub sequence: Sequence,
    pub stages: Vec<StageReport>,
    /// Unknown codes that were skipped, in order.
    pub skipped: Vec<char>,
}

impl PipelineOutput {
    pub fn total_events(&self) -> usize {
        self.stages.iter().map(|s| s.events).sum()
    }
}

/// A validated operator set bound to a mutation spec.
#[derive(Debug, Clone)]
pub struct Pipeline {
    spec: MutationSpec,
    operators: OperatorSet,
}

impl Pipeline {
    /// Build every operator from `config`. Fails on the first invalid
    /// parameter, before any sequence is touched.
    ///
    /// Unknown codes are reported here, once, rather than on every run.
    pub fn new(spec: MutationSpec, config: &MutationConfig) -> Result<Self, MutationError> {
        let operators = config.build()?;
        for code in spec.unknown_codes() {
            warn!("Unknown operator code '{code}'");
        }
        Ok(Self { spec, operators })
    }

    pub fn spec(&self) -> &MutationSpec {
        &self.spec
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    /// Fold `sequence` through every step in order.
    ///
    /// Marks on the input are cleared first, so the output mask only covers
    /// this run. Unknown codes leave the sequence untouched, are listed in
    /// [`PipelineOutput::skipped`] and do not stop later steps.
    pub fn run<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> PipelineOutput {
        let mut current = sequence.clone();
        current.clear_marks();

        let mut stages = Vec::with_capacity(self.spec.len());
        let mut skipped = Vec::new();

        for step in self.spec.steps() {
            match *step {
                Step::Apply(operator) => {
                    let out = self.operators.apply(operator, &current, rng);
                    debug!(
                        "{operator}: {} events, length {} -> {}",
                        out.events,
                        current.len(),
                        out.sequence.len()
                    );
                    stages.push(StageReport {
                        operator,
                        events: out.events,
                        length: out.sequence.len(),
                    });
                    current = out.sequence;
                }
                Step::Unknown(code) => {
                    debug!("skipping unknown operator code '{code}'");
                    skipped.push(code);
                }
            }
        }

        PipelineOutput {
            sequence: current,
            stages,
            skipped,
        }
    }

    /// Parse raw record text and run it through the pipeline.
    pub fn mutate_record<R: Rng + ?Sized>(
        &self,
        raw: &str,
        rng: &mut R,
    ) -> Result<PipelineOutput, InvalidSequence> {
        let sequence = Sequence::from_str(raw)?;
        Ok(self.run(&sequence, rng))
    }
}
