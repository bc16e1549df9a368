//! The fuzzy driving controller.
//!
//! Owns one ready [`Engine`] built from the fixed rule base plus the gear
//! hysteresis state.  One [`FuzzyController::evaluate`] call per control
//! tick:
//!
//! ```text
//!  FuzzyInputs ──▶ set inputs ──▶ steer · gear · accel · brake blocks
//!                                            │
//!  FuzzyOutputs ◀── gear hysteresis ◀── centroid per output
//! ```
//!
//! Single owner, no interior mutability: every mutation goes through
//! `&mut self`.

use log::info;
use serde::{Deserialize, Serialize};

use super::gear::{GearDecision, GearHysteresis};
use super::rule_base::{self, ACCEL, ACCELERATION, BRAKE, GEAR, NEXT_PATH, PATH, SPEED, STABILITY, STEER};
use crate::config::ControllerConfig;
use crate::diagnostics::ControllerMetrics;
use crate::error::{ConfigError, Result};
use crate::fuzzy::Engine;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One complete sensor sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuzzyInputs {
    pub speed: f32,
    pub acceleration: f32,
    /// Signed lateral offset, roughly `[-0.5, 0.5]`.
    pub path: f32,
    /// Lateral offset at the lookahead point.
    pub next_path: f32,
    /// `[0, 1]`, lower is more stable.
    pub stability: f32,
}

/// Crisp control outputs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyOutputs {
    /// `[-1, 1]`
    pub steer: f32,
    /// `[0, 1]`
    pub accel: f32,
    /// `[-1, 6]`
    pub gear: i32,
    /// `[0, 1]`
    pub brake: f32,
}

impl FuzzyOutputs {
    /// Reported before the first tick: stationary, brake fully applied.
    pub const INITIAL: Self = Self {
        steer: 0.0,
        accel: 0.0,
        gear: 0,
        brake: 1.0,
    };
}

impl Default for FuzzyOutputs {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Engine table indices, resolved once at construction.
#[derive(Debug, Clone, Copy)]
struct Channels {
    speed: usize,
    acceleration: usize,
    path: usize,
    next_path: usize,
    stability: usize,
    steer: usize,
    accel: usize,
    gear: usize,
    brake: usize,
}

impl Channels {
    fn resolve(engine: &Engine) -> core::result::Result<Self, ConfigError> {
        let block = engine.name();
        let input = |variable: &'static str| {
            engine
                .input_index(variable)
                .ok_or(ConfigError::UnknownInputVariable { block, variable })
        };
        let output = |variable: &'static str| {
            engine
                .output_index(variable)
                .ok_or(ConfigError::UnknownOutputVariable { block, variable })
        };
        Ok(Self {
            speed: input(SPEED)?,
            acceleration: input(ACCELERATION)?,
            path: input(PATH)?,
            next_path: input(NEXT_PATH)?,
            stability: input(STABILITY)?,
            steer: output(STEER)?,
            accel: output(ACCEL)?,
            gear: output(GEAR)?,
            brake: output(BRAKE)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyController {
    engine: Engine,
    channels: Channels,
    hysteresis: GearHysteresis,
    outputs: FuzzyOutputs,
    raw_gear: f64,
    last_decision: Option<GearDecision>,
    metrics: ControllerMetrics,
}

impl FuzzyController {
    /// Controller with the reference configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(&ControllerConfig::default())
    }

    /// Build the engine and run its readiness check.  Fails on invalid
    /// settings or inconsistent wiring.
    pub fn with_config(config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        let engine = rule_base::build_engine(config.defuzzifier_resolution)?;
        let channels = Channels::resolve(&engine)?;

        let controller = Self {
            engine,
            channels,
            hysteresis: GearHysteresis::new(config.gear_change_speed_delta, config.free_gear_change_max),
            outputs: FuzzyOutputs::INITIAL,
            raw_gear: f64::NAN,
            last_decision: None,
            metrics: ControllerMetrics::new(),
        };
        info!("{}", controller.status_message());
        Ok(controller)
    }

    /// Readiness line for the caller's log.
    pub fn status_message(&self) -> String {
        format!("Fuzzy Controller v{VERSION} - Loaded successfully.")
    }

    /// Run one control tick.
    pub fn evaluate(&mut self, inputs: &FuzzyInputs) -> FuzzyOutputs {
        let ch = self.channels;
        self.engine.set_input(ch.speed, f64::from(inputs.speed));
        self.engine.set_input(ch.acceleration, f64::from(inputs.acceleration));
        self.engine.set_input(ch.path, f64::from(inputs.path));
        self.engine.set_input(ch.next_path, f64::from(inputs.next_path));
        self.engine.set_input(ch.stability, f64::from(inputs.stability));

        self.engine.process();

        self.outputs.steer = self.engine.output_value(ch.steer) as f32;
        self.outputs.accel = self.engine.output_value(ch.accel) as f32;
        self.outputs.brake = self.engine.output_value(ch.brake) as f32;

        self.raw_gear = self.engine.output_value(ch.gear);
        let decision = self.hysteresis.update(self.raw_gear, inputs.speed);
        self.outputs.gear = decision.gear();

        self.last_decision = Some(decision);
        self.metrics.record(self.engine.fired(), decision);
        self.outputs
    }

    /// Outputs from the last tick ([`FuzzyOutputs::INITIAL`] before the
    /// first).
    pub fn outputs(&self) -> FuzzyOutputs {
        self.outputs
    }

    /// Defuzzified gear before hysteresis; `NaN` before the first tick.
    pub fn raw_gear(&self) -> f64 {
        self.raw_gear
    }

    pub fn last_gear_decision(&self) -> Option<GearDecision> {
        self.last_decision
    }

    pub fn gear_state(&self) -> &GearHysteresis {
        &self.hysteresis
    }

    /// Replace the hysteresis state, e.g. to resume a run mid-drive.
    pub fn set_gear_state(&mut self, gear: i32, speed_at_change: f32) {
        self.hysteresis = self.hysteresis.clone().with_state(gear, speed_at_change);
        self.outputs.gear = gear;
    }

    /// Contributing rules per block on the last tick, in evaluation order.
    pub fn trace(&self) -> &[usize] {
        self.engine.fired()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn metrics(&self) -> &ControllerMetrics {
        &self.metrics
    }
}
