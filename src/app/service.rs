//! Application service: the hexagonal core.
//!
//! [`DriveService`] owns one [`FuzzyController`] and drives it from a
//! [`SamplePort`].  All I/O flows through port traits injected at call
//! sites, so the whole loop is testable with mock adapters.
//!
//! ```text
//!  SamplePort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      DriveService      │
//! CommandPort ◀── │  FuzzyController       │
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::ControllerConfig;
use crate::control::{FuzzyController, FuzzyInputs, FuzzyOutputs};
use crate::error::Result;

use super::events::{AppEvent, TelemetryData};
use super::ports::{CommandPort, EventSink, SamplePort};

// ───────────────────────────────────────────────────────────────
// DriveService
// ───────────────────────────────────────────────────────────────

pub struct DriveService {
    controller: FuzzyController,
    /// Ticks between telemetry events; 0 disables telemetry.
    telemetry_interval: u32,
    tick_count: u64,
    gear_changes: u64,
    last_inputs: FuzzyInputs,
}

impl DriveService {
    /// Build the controller from configuration.
    ///
    /// Does **not** emit anything; call [`start`](Self::start) next.
    pub fn new(config: &ControllerConfig) -> Result<Self> {
        Ok(Self {
            controller: FuzzyController::with_config(config)?,
            telemetry_interval: config.telemetry_interval_ticks,
            tick_count: 0,
            gear_changes: 0,
            last_inputs: FuzzyInputs::default(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            status: self.controller.status_message(),
        });
    }

    /// Evaluate one sample and push the result to `commands`.
    pub fn tick(
        &mut self,
        inputs: &FuzzyInputs,
        commands: &mut impl CommandPort,
        sink: &mut impl EventSink,
    ) -> FuzzyOutputs {
        self.tick_count += 1;
        let prev_gear = self.controller.outputs().gear;

        let outputs = self.controller.evaluate(inputs);
        self.last_inputs = *inputs;
        commands.apply(&outputs);

        if outputs.gear != prev_gear {
            self.gear_changes += 1;
            sink.emit(&AppEvent::GearChanged {
                from: prev_gear,
                to: outputs.gear,
                speed: inputs.speed,
            });
        }

        if self.telemetry_interval > 0 && self.tick_count % u64::from(self.telemetry_interval) == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }
        outputs
    }

    /// Tick until the sample port is exhausted.  Returns the tick count.
    pub fn run(
        &mut self,
        samples: &mut impl SamplePort,
        commands: &mut impl CommandPort,
        sink: &mut impl EventSink,
    ) -> u64 {
        self.start(sink);
        while let Some(inputs) = samples.next_sample() {
            self.tick(&inputs, commands, sink);
        }
        sink.emit(&AppEvent::Stopped {
            ticks: self.tick_count,
        });
        info!(
            "drive stopped after {} ticks, {} gear changes",
            self.tick_count, self.gear_changes
        );
        self.tick_count
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            tick: self.tick_count,
            inputs: self.last_inputs,
            outputs: self.controller.outputs(),
            raw_gear: self.controller.raw_gear(),
            metrics: self.controller.metrics().clone(),
        }
    }

    pub fn controller(&self) -> &FuzzyController {
        &self.controller
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn gear_changes(&self) -> u64 {
        self.gear_changes
    }
}
