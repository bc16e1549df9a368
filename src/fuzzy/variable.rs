//! Linguistic variables.
//!
//! A [`Variable`] is a named range with an ordered table of [`Term`]s.
//! [`InputVariable`] adds the crisp value written each tick;
//! [`OutputVariable`] adds per-term activation, aggregation and the
//! defuzzified result.

use heapless::Vec;
use serde::Serialize;

use super::defuzzifier::Centroid;
use super::membership::MembershipFunction;
use super::norm::SNorm;
use crate::error::ConfigError;

/// Fixed capacity of a variable's term table.
pub const MAX_TERMS: usize = 8;

/// A named membership function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Term {
    pub name: &'static str,
    pub membership: MembershipFunction,
}

impl Term {
    pub const fn new(name: &'static str, membership: MembershipFunction) -> Self {
        Self { name, membership }
    }

    pub fn degree(&self, x: f64) -> f64 {
        self.membership.degree(x)
    }
}

// ---------------------------------------------------------------------------
// Variable (shared part)
// ---------------------------------------------------------------------------

/// Name, domain and term table shared by inputs and outputs.
#[derive(Debug, Clone)]
pub struct Variable {
    name: &'static str,
    minimum: f64,
    maximum: f64,
    terms: Vec<Term, MAX_TERMS>,
}

impl Variable {
    /// Unbounded domain, as used by most inputs.
    pub fn new(name: &'static str) -> Self {
        Self::with_range(name, f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn with_range(name: &'static str, minimum: f64, maximum: f64) -> Self {
        Self {
            name,
            minimum,
            maximum,
            terms: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Append a term.  Names must be unique within the variable.
    pub fn add_term(&mut self, term: Term) -> Result<(), ConfigError> {
        if self.term_index(term.name).is_some() {
            return Err(ConfigError::DuplicateTerm {
                variable: self.name,
                term: term.name,
            });
        }
        self.terms
            .push(term)
            .map_err(|_| ConfigError::TooManyTerms(self.name))
    }

    pub fn term(&self, name: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == name)
    }

    /// Record every structural problem with this variable.
    pub(crate) fn check(&self, mut report: impl FnMut(ConfigError)) {
        if self.minimum.is_nan() || self.maximum.is_nan() || self.minimum > self.maximum {
            report(ConfigError::InvalidRange(self.name));
        }
        for term in &self.terms {
            if !term.membership.is_well_formed() {
                report(ConfigError::MalformedTerm {
                    variable: self.name,
                    term: term.name,
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Input variable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct InputVariable {
    variable: Variable,
    value: f64,
}

impl InputVariable {
    pub fn new(variable: Variable) -> Self {
        Self {
            variable,
            value: f64::NAN,
        }
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn name(&self) -> &'static str {
        self.variable.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Written as-is; out-of-range values saturate in the membership
    /// functions.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Degree of the current value in term `term`.  Unset (`NaN`) values
    /// have degree 0 in every term.
    pub fn fuzzify(&self, term: usize) -> f64 {
        self.variable
            .terms
            .get(term)
            .map_or(0.0, |t| t.degree(self.value))
    }
}

// ---------------------------------------------------------------------------
// Output variable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OutputVariable {
    variable: Variable,
    aggregation: SNorm,
    defuzzifier: Centroid,
    default_value: f64,
    lock_previous: bool,
    /// One accumulator per term, reset every tick.
    activation: Vec<f64, MAX_TERMS>,
    value: f64,
    previous: Option<f64>,
}

impl OutputVariable {
    /// Wrap a fully populated variable; the accumulator table is sized
    /// from its terms.
    pub fn new(variable: Variable, aggregation: SNorm, defuzzifier: Centroid) -> Self {
        // Same capacity as the term table.
        let activation = variable.terms().iter().map(|_| 0.0).collect();
        Self {
            variable,
            aggregation,
            defuzzifier,
            default_value: 0.0,
            lock_previous: false,
            activation,
            value: f64::NAN,
            previous: None,
        }
    }

    /// Crisp value reported when no rule fires.
    pub fn with_default(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    /// Keep the last computed value instead of the default when no rule
    /// fires.
    pub fn with_lock_previous(mut self, lock: bool) -> Self {
        self.lock_previous = lock;
        self
    }

    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    pub fn name(&self) -> &'static str {
        self.variable.name
    }

    pub fn aggregation(&self) -> SNorm {
        self.aggregation
    }

    pub fn defuzzifier(&self) -> Centroid {
        self.defuzzifier
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn lock_previous(&self) -> bool {
        self.lock_previous
    }

    /// Crisp value from the last [`defuzzify`](Self::defuzzify).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Accumulated strength per term, in term order.
    pub fn activations(&self) -> &[f64] {
        &self.activation
    }

    pub fn clear_activation(&mut self) {
        self.activation.iter_mut().for_each(|a| *a = 0.0);
    }

    /// Fold `strength` into the accumulator of `term` with the
    /// aggregation operator.
    pub fn activate(&mut self, term: usize, strength: f64) {
        if let Some(acc) = self.activation.get_mut(term) {
            *acc = self.aggregation.apply(*acc, strength);
        }
    }

    /// Degree of the aggregated fuzzy set at `x`: each term clipped at its
    /// accumulated strength, combined with the aggregation operator.
    pub fn aggregated_degree(&self, x: f64) -> f64 {
        self.variable
            .terms
            .iter()
            .zip(self.activation.iter())
            .filter(|(_, a)| **a > 0.0)
            .fold(0.0, |acc, (term, a)| {
                self.aggregation.apply(acc, term.degree(x).min(*a))
            })
    }

    /// Defuzzify the aggregated set and store the crisp result.
    ///
    /// With an empty set the result is the default value, or the previous
    /// value when `lock_previous` is set and one exists.
    pub fn defuzzify(&mut self) -> f64 {
        let crisp = if self.activation.iter().any(|a| *a > 0.0) {
            self.defuzzifier.defuzzify(
                |x| self.aggregated_degree(x),
                self.variable.minimum,
                self.variable.maximum,
            )
        } else {
            None
        };

        self.value = match crisp {
            Some(v) => v,
            None if self.lock_previous => self.previous.unwrap_or(self.default_value),
            None => self.default_value,
        };
        self.previous = Some(self.value);
        self.value
    }
}
