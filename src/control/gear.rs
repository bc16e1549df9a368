//! Gear-change hysteresis.
//!
//! The defuzzified gear is a real number that can wander between bands
//! from one tick to the next.  A new gear is only accepted when either:
//!
//! 1. speed has moved at least `speed_delta` since the last accepted
//!    change, or
//! 2. the currently held gear is at or below `free_change_max` (low gears
//!    change freely).
//!
//! Accepted values round away from zero: `ceil` for forward gears,
//! `floor` for reverse and zero.

use log::debug;
use serde::Serialize;

/// Outcome of one hysteresis step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GearDecision {
    /// Suggestion accepted.  `from == to` when the band did not change.
    Accepted { from: i32, to: i32 },
    /// Suggestion rejected; `gear` is still reported.
    Held { gear: i32, suggested: i32 },
}

impl GearDecision {
    /// Gear reported for this tick.
    pub fn gear(&self) -> i32 {
        match *self {
            Self::Accepted { to, .. } => to,
            Self::Held { gear, .. } => gear,
        }
    }

    /// An accepted suggestion that moved to a different gear.
    pub fn is_shift(&self) -> bool {
        matches!(*self, Self::Accepted { from, to } if from != to)
    }

    /// A rejected suggestion that would have moved to a different gear.
    pub fn is_suppressed_shift(&self) -> bool {
        matches!(*self, Self::Held { gear, suggested } if gear != suggested)
    }
}

/// Round a defuzzified gear away from zero.
pub fn round_gear(raw: f64) -> i32 {
    let rounded = if raw > 0.0 { raw.ceil() } else { raw.floor() };
    if rounded.is_nan() {
        0
    } else {
        rounded.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GearHysteresis {
    speed_delta: f32,
    free_change_max: i32,
    /// Speed recorded at the last accepted change.
    speed_at_change: f32,
    /// Gear reported on the last tick.
    gear: i32,
}

impl GearHysteresis {
    /// Fresh state: gear 0, speed-at-change 0.
    pub fn new(speed_delta: f32, free_change_max: i32) -> Self {
        Self {
            speed_delta,
            free_change_max,
            speed_at_change: 0.0,
            gear: 0,
        }
    }

    /// Seed the held gear and speed-at-change, e.g. when resuming a run.
    #[must_use]
    pub fn with_state(mut self, gear: i32, speed_at_change: f32) -> Self {
        self.gear = gear;
        self.speed_at_change = speed_at_change;
        self
    }

    pub fn gear(&self) -> i32 {
        self.gear
    }

    pub fn speed_at_change(&self) -> f32 {
        self.speed_at_change
    }

    /// Decide which gear to report for this tick.
    ///
    /// A non-finite `speed` never satisfies the speed-delta condition and
    /// is never recorded.
    pub fn update(&mut self, raw_gear: f64, speed: f32) -> GearDecision {
        let suggested = round_gear(raw_gear);
        let moved_enough = (speed - self.speed_at_change).abs() >= self.speed_delta;
        let low_gear = self.gear <= self.free_change_max;

        if !(moved_enough || low_gear) || !speed.is_finite() {
            return GearDecision::Held {
                gear: self.gear,
                suggested,
            };
        }

        let from = self.gear;
        self.gear = suggested;
        self.speed_at_change = speed;
        if from != suggested {
            debug!("gear {from} -> {suggested} at speed {speed:.1} (raw {raw_gear:.3})");
        }
        GearDecision::Accepted {
            from,
            to: suggested,
        }
    }
}
