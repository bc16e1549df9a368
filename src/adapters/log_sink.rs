//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  A telemetry publisher for a simulator dashboard
//! would implement the same trait.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { status } => {
                info!("START | {status}");
            }
            AppEvent::GearChanged { from, to, speed } => {
                debug!("GEAR  | {from} -> {to} at {speed:.1}");
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | tick={} | speed={:.1} path={:+.3} | steer={:+.3} accel={:.3} \
                     brake={:.3} | gear={} (raw {:.2}) | shifts={} held={}",
                    t.tick,
                    t.inputs.speed,
                    t.inputs.path,
                    t.outputs.steer,
                    t.outputs.accel,
                    t.outputs.brake,
                    t.outputs.gear,
                    t.raw_gear,
                    t.metrics.gear_shifts,
                    t.metrics.suppressed_shifts,
                );
            }
            AppEvent::Stopped { ticks } => {
                info!("STOP  | ticks={ticks}");
            }
        }
    }
}
