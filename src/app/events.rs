//! Outbound application events.
//!
//! The [`DriveService`](super::service::DriveService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.

use serde::Serialize;

use crate::control::{FuzzyInputs, FuzzyOutputs};
use crate::diagnostics::ControllerMetrics;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Serialize)]
pub enum AppEvent {
    /// The controller is ready (carries the status line).
    Started { status: String },

    /// The reported gear changed.
    GearChanged { from: i32, to: i32, speed: f32 },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The sample feed ended.
    Stopped { ticks: u64 },
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryData {
    pub tick: u64,
    pub inputs: FuzzyInputs,
    pub outputs: FuzzyOutputs,
    /// Defuzzified gear before hysteresis.
    pub raw_gear: f64,
    pub metrics: ControllerMetrics,
}
