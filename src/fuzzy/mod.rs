//! Mamdani fuzzy inference.
//!
//! ```text
//!  crisp inputs ──▶ fuzzify ──▶ rule blocks ──▶ term accumulators
//!                                                   │
//!  crisp outputs ◀── centroid ◀── aggregation ◀─────┘
//! ```
//!
//! Shapes and operators are closed enums dispatched by `match`.  The
//! structure is a strict ownership tree: the [`Engine`] owns variables and
//! rule blocks, variables own their terms.

pub mod defuzzifier;
pub mod engine;
pub mod membership;
pub mod norm;
pub mod rule;
pub mod variable;

pub use defuzzifier::Centroid;
pub use engine::{Engine, EngineBuilder, EngineSummary};
pub use membership::MembershipFunction;
pub use norm::{SNorm, TNorm};
pub use rule::{Activation, Expression, Rule, RuleBlock};
pub use variable::{InputVariable, OutputVariable, Term, Variable};
