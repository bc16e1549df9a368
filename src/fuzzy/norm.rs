//! Fuzzy operators.
//!
//! t-norms implement fuzzy AND (conjunction, implication); s-norms
//! implement fuzzy OR (disjunction, aggregation).  Both sets are closed:
//! the rule base only ever uses these four operators.

use serde::{Deserialize, Serialize};

/// Triangular norm (fuzzy AND).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TNorm {
    Minimum,
    AlgebraicProduct,
}

impl TNorm {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Minimum => a.min(b),
            Self::AlgebraicProduct => a * b,
        }
    }
}

/// Triangular conorm (fuzzy OR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SNorm {
    Maximum,
    AlgebraicSum,
}

impl SNorm {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Maximum => a.max(b),
            Self::AlgebraicSum => a + b - a * b,
        }
    }
}
