//! The fixed driving rule base.
//!
//! Five inputs, four outputs and four rule blocks.  Everything here is
//! compiled in; [`build_engine`] wires it into a ready [`Engine`].
//!
//! | block              | activation   | drives |
//! |--------------------|--------------|--------|
//! | `steer_rule_block` | proportional | steer  |
//! | `gear_rule_block`  | first        | gear   |
//! | `accel_rule_block` | first        | accel  |
//! | `brake_rule_block` | first        | brake  |

use crate::error::{ConfigError, Result};
use crate::fuzzy::rule::Named;
use crate::fuzzy::{
    Activation, Centroid, Engine, EngineBuilder, Expression, InputVariable, MembershipFunction as Mf,
    OutputVariable, Rule, RuleBlock, SNorm, TNorm, Term, Variable,
};

pub const ENGINE_NAME: &str = "Fuzzy Controller Engine";

// ── Variable names ────────────────────────────────────────────

pub const SPEED: &str = "speed";
pub const ACCELERATION: &str = "acceleration";
pub const PATH: &str = "path";
pub const NEXT_PATH: &str = "next_path";
pub const STABILITY: &str = "stability";

pub const STEER: &str = "steer";
pub const ACCEL: &str = "accel";
pub const GEAR: &str = "gear";
pub const BRAKE: &str = "brake";

// ── Term names ────────────────────────────────────────────────

pub const VERY_VERY_SLOW: &str = "very_very_slow";
pub const VERY_SLOW: &str = "very_slow";
pub const SLOW: &str = "slow";
pub const MEDIUM: &str = "medium";
pub const FAST: &str = "fast";
pub const VERY_FAST: &str = "very_fast";
pub const NEGATIVE: &str = "negative";

pub const TOO_LEFT: &str = "too_left";
pub const LEFT: &str = "left";
pub const STRAIGHT: &str = "straight";
pub const RIGHT: &str = "right";
pub const TOO_RIGHT: &str = "too_right";

pub const STABLE: &str = "stable";
pub const UNSTABLE: &str = "unstable";

pub const REVERSE_GEAR: &str = "reverse_gear";
pub const VERY_LOW_GEAR: &str = "very_low_gear";
pub const LOW_GEAR: &str = "low_gear";
pub const MEDIUM_GEAR: &str = "medium_gear";
pub const HIGH_GEAR: &str = "high_gear";
pub const VERY_HIGH_GEAR: &str = "very_high_gear";

// ── Block names ───────────────────────────────────────────────

pub const STEER_RULE_BLOCK: &str = "steer_rule_block";
pub const GEAR_RULE_BLOCK: &str = "gear_rule_block";
pub const ACCEL_RULE_BLOCK: &str = "accel_rule_block";
pub const BRAKE_RULE_BLOCK: &str = "brake_rule_block";

/// Build the ready engine.  `resolution` is the centroid sample count for
/// every output.
pub fn build_engine(resolution: u16) -> Result<Engine> {
    let centroid = Centroid::new(resolution);

    let mut builder = EngineBuilder::new(ENGINE_NAME);
    for input in input_variables()? {
        builder = builder.input(input);
    }
    for output in output_variables(centroid)? {
        builder = builder.output(output);
    }

    builder
        .rule_block(steer_rules())
        .rule_block(gear_rules())
        .rule_block(accel_rules())
        .rule_block(brake_rules())
        .build()
}

fn variable(name: &'static str, minimum: f64, maximum: f64, terms: &[Term]) -> core::result::Result<Variable, ConfigError> {
    let mut v = Variable::with_range(name, minimum, maximum);
    for term in terms {
        v.add_term(*term)?;
    }
    Ok(v)
}

// ───────────────────────────────────────────────────────────────
// Inputs
// ───────────────────────────────────────────────────────────────

fn input_variables() -> Result<[InputVariable; 5]> {
    const FREE: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);

    let speed = variable(SPEED, FREE.0, FREE.1, &[
        Term::new(VERY_VERY_SLOW, Mf::trapezoid(-0.5, -0.1, 0.1, 0.5)),
        Term::new(VERY_SLOW, Mf::trapezoid(0.4999, 2.0, 10.0, 15.0)),
        Term::new(SLOW, Mf::trapezoid(15.0, 25.0, 40.0, 45.0)),
        Term::new(MEDIUM, Mf::trapezoid(40.0, 45.0, 60.0, 65.0)),
        Term::new(FAST, Mf::trapezoid(60.0, 65.0, 80.0, 85.0)),
        Term::new(VERY_FAST, Mf::ramp(80.0, 85.0)),
    ])?;

    let acceleration = variable(ACCELERATION, FREE.0, FREE.1, &[
        Term::new(NEGATIVE, Mf::ramp(0.0, -1.0)),
        Term::new(VERY_SLOW, Mf::trapezoid(0.0, 0.5, 1.0, 1.5)),
        Term::new(SLOW, Mf::trapezoid(1.0, 1.5, 4.0, 6.0)),
        Term::new(MEDIUM, Mf::trapezoid(4.0, 6.0, 15.0, 20.0)),
        Term::new(FAST, Mf::trapezoid(12.0, 15.0, 20.0, 25.0)),
        Term::new(VERY_FAST, Mf::ramp(20.0, 30.0)),
    ])?;

    let path = variable(PATH, FREE.0, FREE.1, &[
        Term::new(TOO_LEFT, Mf::ramp(-0.4, -0.5)),
        Term::new(LEFT, Mf::trapezoid(-0.5, -0.35, -0.2, -0.1)),
        Term::new(STRAIGHT, Mf::trapezoid(-0.15, -0.07, 0.07, 0.15)),
        Term::new(RIGHT, Mf::trapezoid(0.1, 0.2, 0.35, 0.5)),
        Term::new(TOO_RIGHT, Mf::ramp(0.4, 0.5)),
    ])?;

    let next_path = variable(NEXT_PATH, FREE.0, FREE.1, &[
        Term::new(LEFT, Mf::ramp(-0.15, -0.4)),
        Term::new(STRAIGHT, Mf::trapezoid(-0.16, -0.1, 0.1, 0.16)),
        Term::new(RIGHT, Mf::ramp(0.15, 0.4)),
    ])?;

    let stability = variable(STABILITY, 0.0, 1.0, &[
        Term::new(STABLE, Mf::ramp(0.2, 0.0)),
        Term::new(UNSTABLE, Mf::ramp(0.2, 0.4)),
    ])?;

    Ok([speed, acceleration, path, next_path, stability].map(InputVariable::new))
}

// ───────────────────────────────────────────────────────────────
// Outputs
// ───────────────────────────────────────────────────────────────

fn output_variables(centroid: Centroid) -> Result<[OutputVariable; 4]> {
    let steer = variable(STEER, -1.0, 1.0, &[
        Term::new(TOO_LEFT, Mf::ramp(-0.3, -0.4)),
        Term::new(LEFT, Mf::trapezoid(-0.4, -0.3, -0.15, -0.1)),
        Term::new(STRAIGHT, Mf::trapezoid(-0.12, -0.05, 0.05, 0.12)),
        Term::new(RIGHT, Mf::trapezoid(0.1, 0.15, 0.3, 0.4)),
        Term::new(TOO_RIGHT, Mf::ramp(0.3, 0.4)),
    ])?;

    let accel = variable(ACCEL, 0.0, 1.0, &[
        Term::new(VERY_SLOW, Mf::ramp(0.2, 0.1)),
        Term::new(SLOW, Mf::trapezoid(0.15, 0.3, 0.5, 0.6)),
        Term::new(MEDIUM, Mf::trapezoid(0.4, 0.5, 0.6, 0.7)),
        Term::new(FAST, Mf::trapezoid(0.55, 0.7, 0.8, 0.95)),
        Term::new(VERY_FAST, Mf::ramp(0.9, 1.0)),
    ])?;

    // Gear bands are mutually exclusive, so they aggregate with maximum.
    let gear = variable(GEAR, -1.0, 6.0, &[
        Term::new(REVERSE_GEAR, Mf::ramp(0.0, -1.0)),
        Term::new(VERY_LOW_GEAR, Mf::rectangle(1.0, 2.0)),
        Term::new(LOW_GEAR, Mf::rectangle(2.0, 3.0)),
        Term::new(MEDIUM_GEAR, Mf::rectangle(3.0, 4.0)),
        Term::new(HIGH_GEAR, Mf::rectangle(4.0, 5.0)),
        Term::new(VERY_HIGH_GEAR, Mf::ramp(5.0, 6.0)),
    ])?;

    let brake = variable(BRAKE, 0.0, 1.0, &[
        Term::new(VERY_SLOW, Mf::ramp(0.05, 0.02)),
        Term::new(SLOW, Mf::trapezoid(0.02, 0.05, 0.08, 0.09)),
        Term::new(MEDIUM, Mf::trapezoid(0.08, 0.09, 0.1, 0.11)),
        Term::new(FAST, Mf::trapezoid(0.11, 0.115, 0.12, 0.125)),
        Term::new(VERY_FAST, Mf::ramp(0.12, 0.13)),
    ])?;

    Ok([
        OutputVariable::new(steer, SNorm::AlgebraicSum, centroid).with_default(0.0),
        OutputVariable::new(accel, SNorm::AlgebraicSum, centroid).with_default(1.0),
        OutputVariable::new(gear, SNorm::Maximum, centroid)
            .with_default(1.0)
            .with_lock_previous(true),
        OutputVariable::new(brake, SNorm::AlgebraicSum, centroid).with_default(0.0),
    ])
}

// ───────────────────────────────────────────────────────────────
// Rule blocks
// ───────────────────────────────────────────────────────────────

fn block(name: &'static str, activation: Activation) -> RuleBlock<Named> {
    RuleBlock::new(name, activation).with_operators(TNorm::Minimum, SNorm::Maximum, TNorm::AlgebraicProduct)
}

/// Path position maps directly onto the steering term of the same name.
fn steer_rules() -> RuleBlock<Named> {
    [STRAIGHT, RIGHT, LEFT, TOO_RIGHT, TOO_LEFT]
        .into_iter()
        .fold(block(STEER_RULE_BLOCK, Activation::Proportional), |b, t| {
            b.rule(Rule::when(Expression::is(PATH, t)).then(STEER, t))
        })
}

fn gear_rules() -> RuleBlock<Named> {
    [
        (VERY_FAST, VERY_HIGH_GEAR),
        (FAST, HIGH_GEAR),
        (MEDIUM, MEDIUM_GEAR),
        (SLOW, LOW_GEAR),
        (VERY_SLOW, VERY_LOW_GEAR),
    ]
    .into_iter()
    .fold(block(GEAR_RULE_BLOCK, Activation::First), |b, (speed, gear)| {
        b.rule(Rule::when(Expression::is(SPEED, speed)).then(GEAR, gear))
    })
}

/// `(path is too_left or path is too_right) and speed is <speed>`
fn off_track_at(speed: &'static str) -> Expression<Named> {
    Expression::is(PATH, TOO_LEFT)
        .or(Expression::is(PATH, TOO_RIGHT))
        .and(Expression::is(SPEED, speed))
}

fn accel_rules() -> RuleBlock<Named> {
    [(VERY_FAST, VERY_SLOW), (FAST, SLOW), (MEDIUM, SLOW)]
        .into_iter()
        .fold(block(ACCEL_RULE_BLOCK, Activation::First), |b, (speed, accel)| {
            b.rule(Rule::when(off_track_at(speed)).then(ACCEL, accel))
        })
}

fn brake_rules() -> RuleBlock<Named> {
    [(VERY_FAST, VERY_FAST), (FAST, FAST), (MEDIUM, MEDIUM)]
        .into_iter()
        .fold(block(BRAKE_RULE_BLOCK, Activation::First), |b, (speed, brake)| {
            b.rule(Rule::when(off_track_at(speed)).then(BRAKE, brake))
        })
}
