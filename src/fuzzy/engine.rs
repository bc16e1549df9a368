//! Inference engine.
//!
//! [`EngineBuilder`] collects variables and rule blocks by name;
//! [`EngineBuilder::build`] runs the readiness check and binds every rule
//! to table indices.  An [`Engine`] therefore only exists in the ready
//! state.
//!
//! One [`Engine::process`] call:
//!
//! 1. clears every output accumulator,
//! 2. activates each rule block in insertion order,
//! 3. defuzzifies every output.

use heapless::Vec as BoundedVec;
use log::warn;
use serde::Serialize;

use super::rule::{Bound, Named, RuleBlock};
use super::variable::{InputVariable, OutputVariable};
use crate::error::{ConfigError, ReadinessReport, Result};

/// Upper bound on rule blocks tracked per tick.
pub const MAX_RULE_BLOCKS: usize = 8;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct EngineBuilder {
    name: &'static str,
    inputs: Vec<InputVariable>,
    outputs: Vec<OutputVariable>,
    blocks: Vec<RuleBlock<Named>>,
}

impl EngineBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inputs: Vec::new(),
            outputs: Vec::new(),
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn input(mut self, variable: InputVariable) -> Self {
        self.inputs.push(variable);
        self
    }

    #[must_use]
    pub fn output(mut self, variable: OutputVariable) -> Self {
        self.outputs.push(variable);
        self
    }

    #[must_use]
    pub fn rule_block(mut self, block: RuleBlock<Named>) -> Self {
        self.blocks.push(block);
        self
    }

    /// Check the wiring and bind every rule.  All problems are collected
    /// into one [`ReadinessReport`].
    pub fn build(self) -> Result<Engine> {
        let mut report = ReadinessReport::new();
        let mut push = |e: ConfigError| report.push(e);

        if self.inputs.is_empty() {
            push(ConfigError::NoInputVariables);
        }
        if self.outputs.is_empty() {
            push(ConfigError::NoOutputVariables);
        }
        if self.blocks.is_empty() {
            push(ConfigError::NoRuleBlocks);
        }
        if self.blocks.len() > MAX_RULE_BLOCKS {
            push(ConfigError::InvalidSetting("too many rule blocks"));
        }

        check_unique(self.inputs.iter().map(InputVariable::name), &mut |n: &'static str| {
            push(ConfigError::DuplicateVariable(n));
        });
        check_unique(self.outputs.iter().map(OutputVariable::name), &mut |n: &'static str| {
            push(ConfigError::DuplicateVariable(n));
        });
        check_unique(self.blocks.iter().map(RuleBlock::name), &mut |n: &'static str| {
            push(ConfigError::DuplicateRuleBlock(n));
        });

        for input in &self.inputs {
            input.variable().check(&mut push);
        }
        for output in &self.outputs {
            let v = output.variable();
            v.check(&mut push);
            if !v.minimum().is_finite() || !v.maximum().is_finite() {
                push(ConfigError::InvalidRange(v.name()));
            }
        }

        let mut blocks = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if let Some(bound) = block.bind(&self.inputs, &self.outputs, &mut push) {
                blocks.push(bound);
            }
        }

        if let Err(e) = report.into_result() {
            warn!("engine `{}` not ready: {}", self.name, e);
            return Err(e);
        }

        Ok(Engine {
            name: self.name,
            inputs: self.inputs,
            outputs: self.outputs,
            blocks,
            fired: BoundedVec::new(),
        })
    }
}

fn check_unique(names: impl Iterator<Item = &'static str>, dup: &mut impl FnMut(&'static str)) {
    let mut seen: Vec<&'static str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            dup(name);
        } else {
            seen.push(name);
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A ready-to-run inference engine.
#[derive(Debug, Clone)]
pub struct Engine {
    name: &'static str,
    inputs: Vec<InputVariable>,
    outputs: Vec<OutputVariable>,
    blocks: Vec<RuleBlock<Bound>>,
    /// Contributing rule count per block for the last `process`.
    fired: BoundedVec<usize, MAX_RULE_BLOCKS>,
}

impl Engine {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn inputs(&self) -> &[InputVariable] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputVariable] {
        &self.outputs
    }

    pub fn rule_blocks(&self) -> &[RuleBlock<Bound>] {
        &self.blocks
    }

    pub fn input(&self, name: &str) -> Option<&InputVariable> {
        self.inputs.iter().find(|v| v.name() == name)
    }

    pub fn output(&self, name: &str) -> Option<&OutputVariable> {
        self.outputs.iter().find(|v| v.name() == name)
    }

    pub fn rule_block(&self, name: &str) -> Option<&RuleBlock<Bound>> {
        self.blocks.iter().find(|b| b.name() == name)
    }

    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|v| v.name() == name)
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|v| v.name() == name)
    }

    /// Set an input by table index.  Out-of-range indices are ignored.
    pub fn set_input(&mut self, index: usize, value: f64) {
        if let Some(v) = self.inputs.get_mut(index) {
            v.set_value(value);
        }
    }

    /// Set an input by name.  Returns `false` for an unknown name.
    pub fn set_input_value(&mut self, name: &str, value: f64) -> bool {
        match self.input_index(name) {
            Some(i) => {
                self.set_input(i, value);
                true
            }
            None => false,
        }
    }

    /// Crisp value of output `index` from the last [`process`](Self::process).
    pub fn output_value(&self, index: usize) -> f64 {
        self.outputs.get(index).map_or(f64::NAN, OutputVariable::value)
    }

    /// Run one inference pass over the current input values.
    pub fn process(&mut self) {
        for out in &mut self.outputs {
            out.clear_activation();
        }

        self.fired.clear();
        for block in &self.blocks {
            let n = block.activate(&self.inputs, &mut self.outputs);
            // Capacity is checked in `build`.
            let _ = self.fired.push(n);
        }

        for out in &mut self.outputs {
            out.defuzzify();
        }
    }

    /// Rules that contributed in each block during the last pass, in
    /// block order.
    pub fn fired(&self) -> &[usize] {
        &self.fired
    }

    /// Serialisable description of the engine's structure.
    pub fn describe(&self) -> EngineSummary {
        EngineSummary {
            name: self.name,
            inputs: self.inputs.iter().map(|v| summarize(v.variable())).collect(),
            outputs: self.outputs.iter().map(|v| summarize(v.variable())).collect(),
            rule_blocks: self
                .blocks
                .iter()
                .map(|b| BlockSummary {
                    name: b.name(),
                    enabled: b.is_enabled(),
                    activation: b.activation(),
                    rules: b.rules().len(),
                })
                .collect(),
        }
    }
}

fn summarize(v: &super::variable::Variable) -> VariableSummary {
    VariableSummary {
        name: v.name(),
        minimum: v.minimum(),
        maximum: v.maximum(),
        terms: v.terms().iter().map(|t| t.name).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineSummary {
    pub name: &'static str,
    pub inputs: Vec<VariableSummary>,
    pub outputs: Vec<VariableSummary>,
    pub rule_blocks: Vec<BlockSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableSummary {
    pub name: &'static str,
    pub minimum: f64,
    pub maximum: f64,
    pub terms: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockSummary {
    pub name: &'static str,
    pub enabled: bool,
    pub activation: super::rule::Activation,
    pub rules: usize,
}
