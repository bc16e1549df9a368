//! Unified error types for the fuzzy driving controller.
//!
//! Only construction can fail.  The per-tick path has no error
//! conditions: out-of-domain inputs saturate and outputs with no firing
//! rule fall back to their default value.

use core::fmt;

use heapless::Vec;

/// Maximum number of problems kept in a [`ReadinessReport`].
pub const MAX_REPORTED_PROBLEMS: usize = 16;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A single configuration problem.
    Config(ConfigError),
    /// The engine failed its readiness check; carries every problem found.
    NotReady(ReadinessReport),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::NotReady(report) => write!(f, "engine not ready: {report}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Wiring or settings problem detected while building the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    NoInputVariables,
    NoOutputVariables,
    NoRuleBlocks,
    /// Two variables of the same role share a name.
    DuplicateVariable(&'static str),
    /// Two rule blocks share a name.
    DuplicateRuleBlock(&'static str),
    DuplicateTerm {
        variable: &'static str,
        term: &'static str,
    },
    /// The variable's fixed-capacity term table is full.
    TooManyTerms(&'static str),
    /// `minimum > maximum` or a non-finite bound.
    InvalidRange(&'static str),
    /// Break points out of order or not finite.
    MalformedTerm {
        variable: &'static str,
        term: &'static str,
    },
    UnknownInputVariable {
        block: &'static str,
        variable: &'static str,
    },
    UnknownOutputVariable {
        block: &'static str,
        variable: &'static str,
    },
    UnknownTerm {
        block: &'static str,
        variable: &'static str,
        term: &'static str,
    },
    /// A tunable setting is out of its valid range.
    InvalidSetting(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInputVariables => write!(f, "no input variables"),
            Self::NoOutputVariables => write!(f, "no output variables"),
            Self::NoRuleBlocks => write!(f, "no rule blocks"),
            Self::DuplicateVariable(name) => write!(f, "duplicate variable `{name}`"),
            Self::DuplicateRuleBlock(name) => write!(f, "duplicate rule block `{name}`"),
            Self::DuplicateTerm { variable, term } => {
                write!(f, "duplicate term `{term}` in variable `{variable}`")
            }
            Self::TooManyTerms(name) => write!(f, "too many terms in variable `{name}`"),
            Self::InvalidRange(name) => write!(f, "invalid range for variable `{name}`"),
            Self::MalformedTerm { variable, term } => {
                write!(f, "malformed term `{term}` in variable `{variable}`")
            }
            Self::UnknownInputVariable { block, variable } => {
                write!(f, "rule block `{block}` references unknown input variable `{variable}`")
            }
            Self::UnknownOutputVariable { block, variable } => {
                write!(f, "rule block `{block}` references unknown output variable `{variable}`")
            }
            Self::UnknownTerm {
                block,
                variable,
                term,
            } => write!(
                f,
                "rule block `{block}` references unknown term `{term}` of variable `{variable}`"
            ),
            Self::InvalidSetting(what) => write!(f, "invalid setting: {what}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Readiness report
// ---------------------------------------------------------------------------

/// Every problem found by one readiness check.
///
/// Bounded: problems past [`MAX_REPORTED_PROBLEMS`] are only counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadinessReport {
    problems: Vec<ConfigError, MAX_REPORTED_PROBLEMS>,
    dropped: usize,
}

impl ReadinessReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, problem: ConfigError) {
        if self.problems.push(problem).is_err() {
            self.dropped += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[ConfigError] {
        &self.problems
    }

    /// Total number of problems, including those not stored.
    pub fn len(&self) -> usize {
        self.problems.len() + self.dropped
    }

    /// `Ok(())` when no problem was recorded.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::NotReady(self))
        }
    }
}

impl fmt::Display for ReadinessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{problem}")?;
        }
        if self.dropped > 0 {
            write!(f, "; and {} more", self.dropped)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
