//! Port traits: the boundary between the controller and the outside world.
//!
//! ```text
//!   SamplePort ──▶ DriveService ──▶ CommandPort
//!                       │
//!                       └──▶ EventSink
//! ```
//!
//! The simulator or vehicle bus sits behind [`SamplePort`] and
//! [`CommandPort`].  The [`DriveService`](super::service::DriveService)
//! consumes them via generics, so the control core never touches I/O
//! directly.

use crate::control::{FuzzyInputs, FuzzyOutputs};

// ───────────────────────────────────────────────────────────────
// Sample port (driven adapter: sensors → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the service pulls one complete sample per tick.
pub trait SamplePort {
    /// Next sample, or `None` when the feed is exhausted.
    fn next_sample(&mut self) -> Option<FuzzyInputs>;
}

// ───────────────────────────────────────────────────────────────
// Command port (driven adapter: domain → actuators)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the service pushes the outputs of every tick.
pub trait CommandPort {
    fn apply(&mut self, outputs: &FuzzyOutputs);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
