//! End-to-end driving scenarios against the public controller API.

use fuzzydrive::control::GearDecision;
use fuzzydrive::control::rule_base::{GEAR, STEER_RULE_BLOCK};
use fuzzydrive::fuzzy::Activation;
use fuzzydrive::{ControllerConfig, FuzzyController, FuzzyInputs, FuzzyOutputs};

fn inputs(speed: f32, acceleration: f32, path: f32, next_path: f32, stability: f32) -> FuzzyInputs {
    FuzzyInputs {
        speed,
        acceleration,
        path,
        next_path,
        stability,
    }
}

#[test]
fn cruising_straight_keeps_wheel_centred_in_top_gear() {
    let mut c = FuzzyController::new().unwrap();
    let out = c.evaluate(&inputs(90.0, 10.0, 0.0, 0.0, 0.1));

    assert!(out.steer.abs() < 1e-3);
    assert_eq!(out.gear, 6);
    assert!(out.accel > 0.9);
    assert!(out.brake < 1e-3);
    // Raw gear is the centroid of the very-high ramp, between 5 and 6.
    assert!(c.raw_gear() > 5.0 && c.raw_gear() < 6.0);
}

#[test]
fn drifting_right_at_speed_corrects_and_slows() {
    let mut c = FuzzyController::new().unwrap();
    let out = c.evaluate(&inputs(70.0, 5.0, 0.45, 0.0, 0.1));

    assert!(out.steer > 0.3, "steer {}", out.steer);
    assert!(out.brake > 0.05, "brake {}", out.brake);
    assert!(out.accel < 1.0, "accel {}", out.accel);
    assert_eq!(c.trace(), &[2, 1, 1, 1]);
}

#[test]
fn stopped_car_uses_output_defaults() {
    let mut c = FuzzyController::new().unwrap();
    let out = c.evaluate(&inputs(0.0, 0.0, 0.0, 0.0, 0.1));

    // No accel or brake rule fires on track.
    assert_eq!(out.accel, 1.0);
    assert_eq!(out.brake, 0.0);
    assert_eq!(out.gear, 1);
}

#[test]
fn status_line_names_version() {
    let c = FuzzyController::new().unwrap();
    assert_eq!(
        c.status_message(),
        format!("Fuzzy Controller v{} - Loaded successfully.", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn outputs_before_first_tick_hold_the_brake() {
    let c = FuzzyController::new().unwrap();
    assert_eq!(
        c.outputs(),
        FuzzyOutputs {
            steer: 0.0,
            accel: 0.0,
            gear: 0,
            brake: 1.0
        }
    );
}

#[test]
fn wider_hysteresis_delays_high_gear_shifts() {
    let config = ControllerConfig {
        gear_change_speed_delta: 20.0,
        ..ControllerConfig::default()
    };
    let mut c = FuzzyController::with_config(&config).unwrap();
    c.set_gear_state(4, 50.0);

    let out = c.evaluate(&inputs(66.0, 0.0, 0.0, 0.0, 0.1));
    assert_eq!(out.gear, 4);
    assert_eq!(c.last_gear_decision(), Some(GearDecision::Held { gear: 4, suggested: 5 }));

    let out = c.evaluate(&inputs(70.0, 0.0, 0.0, 0.0, 0.1));
    assert_eq!(out.gear, 5);
}

#[test]
fn engine_description_lists_the_rule_base() {
    let c = FuzzyController::new().unwrap();
    let summary = c.engine().describe();

    assert_eq!(summary.inputs.len(), 5);
    assert_eq!(summary.outputs.len(), 4);
    let steer = summary
        .rule_blocks
        .iter()
        .find(|b| b.name == STEER_RULE_BLOCK)
        .unwrap();
    assert_eq!(steer.activation, Activation::Proportional);
    assert_eq!(steer.rules, 5);

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains(GEAR));
    assert!(json.contains("very_high_gear"));
}
