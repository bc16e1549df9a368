//! Mock ports for integration tests.
//!
//! Replays a fixed sample list and records every command and event so
//! tests can assert on the full history.

use std::collections::VecDeque;

use fuzzydrive::app::events::AppEvent;
use fuzzydrive::app::ports::{CommandPort, EventSink, SamplePort};
use fuzzydrive::{FuzzyInputs, FuzzyOutputs};

// ── MockFeed ──────────────────────────────────────────────────

pub struct MockFeed {
    samples: VecDeque<FuzzyInputs>,
}

impl MockFeed {
    pub fn new(samples: impl IntoIterator<Item = FuzzyInputs>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl SamplePort for MockFeed {
    fn next_sample(&mut self) -> Option<FuzzyInputs> {
        self.samples.pop_front()
    }
}

// ── MockActuators ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockActuators {
    pub commands: Vec<FuzzyOutputs>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FuzzyOutputs> {
        self.commands.last()
    }

    pub fn gears(&self) -> Vec<i32> {
        self.commands.iter().map(|c| c.gear).collect()
    }
}

impl CommandPort for MockActuators {
    fn apply(&mut self, outputs: &FuzzyOutputs) {
        self.commands.push(*outputs);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gear_changes(&self) -> Vec<(i32, i32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::GearChanged { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Sample helpers ────────────────────────────────────────────

pub fn sample(speed: f32, path: f32) -> FuzzyInputs {
    FuzzyInputs {
        speed,
        acceleration: 0.0,
        path,
        next_path: 0.0,
        stability: 0.1,
    }
}

/// Straight-line speed ramp from `from` to `to` in `steps` ticks.
pub fn speed_ramp(from: f32, to: f32, steps: usize) -> Vec<FuzzyInputs> {
    let n = steps.max(2) - 1;
    (0..=n)
        .map(|i| sample(from + (to - from) * i as f32 / n as f32, 0.0))
        .collect()
}
