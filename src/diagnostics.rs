//! Runtime diagnostics for the controller.
//!
//! Counters are updated once per `evaluate` call and can be serialised
//! for a telemetry frame or a shutdown summary.

use heapless::Vec;
use serde::Serialize;

use crate::control::gear::GearDecision;
use crate::fuzzy::engine::MAX_RULE_BLOCKS;

/// Cumulative counters since construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControllerMetrics {
    /// `evaluate` calls.
    pub ticks: u64,
    /// Accepted suggestions that changed the reported gear.
    pub gear_shifts: u64,
    /// Suggested gear changes rejected by hysteresis.
    pub suppressed_shifts: u64,
    /// Contributing rules summed per block, in block order.
    pub rules_fired: Vec<u64, MAX_RULE_BLOCKS>,
    /// Ticks on which no block contributed at all.
    pub idle_ticks: u64,
}

impl ControllerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fired: &[usize], decision: GearDecision) {
        self.ticks = self.ticks.saturating_add(1);

        while self.rules_fired.len() < fired.len() {
            if self.rules_fired.push(0).is_err() {
                break;
            }
        }
        for (total, n) in self.rules_fired.iter_mut().zip(fired) {
            *total = total.saturating_add(*n as u64);
        }
        if fired.iter().all(|n| *n == 0) {
            self.idle_ticks = self.idle_ticks.saturating_add(1);
        }

        if decision.is_shift() {
            self.gear_shifts = self.gear_shifts.saturating_add(1);
        } else if decision.is_suppressed_shift() {
            self.suppressed_shifts = self.suppressed_shifts.saturating_add(1);
        }
    }
}
