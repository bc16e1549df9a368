//! Rules and rule blocks.
//!
//! A rule is an immutable antecedent tree over `variable is term`
//! propositions plus one weighted consequent.  Rules are declared with
//! names ([`Named`]) and bound to table indices ([`Bound`]) once, when
//! the engine is built, so the per-tick path never looks up strings.
//!
//! ```text
//!   if (path is too_left or path is too_right) and speed is fast
//!        └──────────── Or ─────────────┘
//!        └──────────────────── And ─────────────────────────┘
//!   then brake is fast
//! ```

use super::norm::{SNorm, TNorm};
use super::variable::{InputVariable, OutputVariable};
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Proposition references
// ---------------------------------------------------------------------------

/// `variable is term`, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Named {
    pub variable: &'static str,
    pub term: &'static str,
}

/// `variable is term`, by index into the engine's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub variable: usize,
    pub term: usize,
}

// ---------------------------------------------------------------------------
// Antecedent expression tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Expression<P = Bound> {
    Proposition(P),
    And(Box<Expression<P>>, Box<Expression<P>>),
    Or(Box<Expression<P>>, Box<Expression<P>>),
}

impl Expression<Named> {
    pub fn is(variable: &'static str, term: &'static str) -> Self {
        Self::Proposition(Named { variable, term })
    }
}

impl<P> Expression<P> {
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Rebuild the tree with every proposition mapped through `f`.
    pub fn try_map<Q, E>(&self, f: &mut impl FnMut(&P) -> Result<Q, E>) -> Result<Expression<Q>, E> {
        Ok(match self {
            Self::Proposition(p) => Expression::Proposition(f(p)?),
            Self::And(l, r) => Expression::And(Box::new(l.try_map(f)?), Box::new(r.try_map(f)?)),
            Self::Or(l, r) => Expression::Or(Box::new(l.try_map(f)?), Box::new(r.try_map(f)?)),
        })
    }
}

impl Expression<Bound> {
    /// Firing strength against the current input values.
    pub fn evaluate(&self, inputs: &[InputVariable], conjunction: TNorm, disjunction: SNorm) -> f64 {
        match self {
            Self::Proposition(p) => inputs.get(p.variable).map_or(0.0, |v| v.fuzzify(p.term)),
            Self::And(l, r) => conjunction.apply(
                l.evaluate(inputs, conjunction, disjunction),
                r.evaluate(inputs, conjunction, disjunction),
            ),
            Self::Or(l, r) => disjunction.apply(
                l.evaluate(inputs, conjunction, disjunction),
                r.evaluate(inputs, conjunction, disjunction),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Rule<P = Bound> {
    pub antecedent: Expression<P>,
    pub consequent: P,
    pub weight: f64,
}

impl Rule<Named> {
    /// Start a rule from its antecedent; finish with [`RuleBuilder::then`].
    pub fn when(antecedent: Expression<Named>) -> RuleBuilder {
        RuleBuilder { antecedent }
    }
}

pub struct RuleBuilder {
    antecedent: Expression<Named>,
}

impl RuleBuilder {
    pub fn then(self, variable: &'static str, term: &'static str) -> Rule<Named> {
        Rule {
            antecedent: self.antecedent,
            consequent: Named { variable, term },
            weight: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule block
// ---------------------------------------------------------------------------

/// How firing strengths reach the consequent accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Activation {
    /// Only the first rule, in declaration order, with non-zero firing
    /// strength contributes.
    First,
    /// Every firing rule contributes its share of the block's total
    /// firing strength.
    Proportional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleBlock<P = Bound> {
    name: &'static str,
    enabled: bool,
    conjunction: TNorm,
    disjunction: SNorm,
    implication: TNorm,
    activation: Activation,
    rules: Vec<Rule<P>>,
}

impl<P> RuleBlock<P> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn conjunction(&self) -> TNorm {
        self.conjunction
    }

    pub fn disjunction(&self) -> SNorm {
        self.disjunction
    }

    pub fn implication(&self) -> TNorm {
        self.implication
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn rules(&self) -> &[Rule<P>] {
        &self.rules
    }
}

impl RuleBlock<Named> {
    /// Minimum / maximum / algebraic-product block, enabled.
    pub fn new(name: &'static str, activation: Activation) -> Self {
        Self {
            name,
            enabled: true,
            conjunction: TNorm::Minimum,
            disjunction: SNorm::Maximum,
            implication: TNorm::AlgebraicProduct,
            activation,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_operators(mut self, conjunction: TNorm, disjunction: SNorm, implication: TNorm) -> Self {
        self.conjunction = conjunction;
        self.disjunction = disjunction;
        self.implication = implication;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule<Named>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Resolve every name against the engine's tables.  All unresolved
    /// references are reported, not just the first.
    pub(crate) fn bind(
        &self,
        inputs: &[InputVariable],
        outputs: &[OutputVariable],
        report: &mut impl FnMut(ConfigError),
    ) -> Option<RuleBlock<Bound>> {
        let block = self.name;
        let mut ok = true;
        let mut rules = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let antecedent = rule.antecedent.try_map(&mut |p: &Named| {
                let Some(variable) = inputs.iter().position(|v| v.name() == p.variable) else {
                    report(ConfigError::UnknownInputVariable {
                        block,
                        variable: p.variable,
                    });
                    return Err(());
                };
                let Some(term) = inputs[variable].variable().term_index(p.term) else {
                    report(ConfigError::UnknownTerm {
                        block,
                        variable: p.variable,
                        term: p.term,
                    });
                    return Err(());
                };
                Ok(Bound { variable, term })
            });

            let consequent = bind_consequent(block, &rule.consequent, outputs, report);

            match (antecedent, consequent) {
                (Ok(antecedent), Some(consequent)) => rules.push(Rule {
                    antecedent,
                    consequent,
                    weight: rule.weight,
                }),
                _ => ok = false,
            }
        }

        ok.then(|| RuleBlock {
            name: self.name,
            enabled: self.enabled,
            conjunction: self.conjunction,
            disjunction: self.disjunction,
            implication: self.implication,
            activation: self.activation,
            rules,
        })
    }
}

fn bind_consequent(
    block: &'static str,
    consequent: &Named,
    outputs: &[OutputVariable],
    report: &mut impl FnMut(ConfigError),
) -> Option<Bound> {
    let Some(variable) = outputs.iter().position(|v| v.name() == consequent.variable) else {
        report(ConfigError::UnknownOutputVariable {
            block,
            variable: consequent.variable,
        });
        return None;
    };
    let Some(term) = outputs[variable].variable().term_index(consequent.term) else {
        report(ConfigError::UnknownTerm {
            block,
            variable: consequent.variable,
            term: consequent.term,
        });
        return None;
    };
    Some(Bound { variable, term })
}

impl RuleBlock<Bound> {
    /// Evaluate every rule against the inputs and accumulate implicated
    /// strengths into the outputs.  Returns the number of rules that
    /// contributed.
    pub fn activate(&self, inputs: &[InputVariable], outputs: &mut [OutputVariable]) -> usize {
        if !self.enabled {
            return 0;
        }
        match self.activation {
            Activation::First => {
                for rule in &self.rules {
                    let firing = self.firing_strength(rule, inputs);
                    if firing > 0.0 {
                        self.fire(rule, firing, outputs);
                        return 1;
                    }
                }
                0
            }
            Activation::Proportional => {
                let mut firing = Vec::with_capacity(self.rules.len());
                firing.extend(self.rules.iter().map(|r| self.firing_strength(r, inputs)));
                let total: f64 = firing.iter().sum();
                if total <= 0.0 {
                    return 0;
                }
                let mut fired = 0;
                for (rule, strength) in self.rules.iter().zip(firing) {
                    if strength > 0.0 {
                        self.fire(rule, strength / total, outputs);
                        fired += 1;
                    }
                }
                fired
            }
        }
    }

    fn firing_strength(&self, rule: &Rule, inputs: &[InputVariable]) -> f64 {
        let degree = rule
            .antecedent
            .evaluate(inputs, self.conjunction, self.disjunction);
        // NaN never fires.
        if degree.is_nan() { 0.0 } else { degree.clamp(0.0, 1.0) }
    }

    fn fire(&self, rule: &Rule, strength: f64, outputs: &mut [OutputVariable]) {
        let implicated = self.implication.apply(strength, rule.weight);
        if let Some(out) = outputs.get_mut(rule.consequent.variable) {
            out.activate(rule.consequent.term, implicated);
        }
    }
}
