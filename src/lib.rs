//! fuzzydrive library.
//!
//! A Mamdani fuzzy controller for a simulated car: five crisp sensor
//! inputs in, steer / accel / brake / gear out, with hysteresis on gear
//! changes.  The host binary in `main.rs` wires it to JSON lines on
//! stdin/stdout.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod diagnostics;
pub mod error;
pub mod fuzzy;

pub use config::ControllerConfig;
pub use control::{FuzzyController, FuzzyInputs, FuzzyOutputs};
pub use error::{ConfigError, Error, Result};
