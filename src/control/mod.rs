//! Driving control built on the fuzzy engine.
//!
//! - [`rule_base`]: the compiled-in variables, terms and rule blocks
//! - [`gear`]: hysteresis on the defuzzified gear
//! - [`controller`]: per-tick evaluation

pub mod controller;
pub mod gear;
pub mod rule_base;

pub use controller::{FuzzyController, FuzzyInputs, FuzzyOutputs};
pub use gear::{GearDecision, GearHysteresis};
