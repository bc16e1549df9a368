//! fuzzydrive: Main Entry Point
//!
//! Reads one JSON sample per stdin line, writes one JSON command per
//! stdout line.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  JsonLinesSource    JsonLinesSink    LogEventSink        │
//! │  (SamplePort)       (CommandPort)    (EventSink)         │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            DriveService (pure logic)           │      │
//! │  │  FuzzyController · GearHysteresis              │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `fuzzydrive [config.json]`.  Log level from `FUZZYDRIVE_LOG`.

use std::io::{self, BufReader};

use anyhow::{Context, Result};
use log::{info, warn};

use fuzzydrive::adapters::json_lines::{JsonLinesSink, JsonLinesSource};
use fuzzydrive::adapters::log_sink::LogEventSink;
use fuzzydrive::adapters::logging;
use fuzzydrive::app::service::DriveService;
use fuzzydrive::config::ControllerConfig;

fn load_config(path: Option<String>) -> Result<ControllerConfig> {
    let Some(path) = path else {
        return Ok(ControllerConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?;
    info!("Loaded configuration from {path}");
    Ok(config)
}

fn main() -> Result<()> {
    logging::init().context("installing logger")?;

    let config = load_config(std::env::args().nth(1))?;
    let mut service = DriveService::new(&config).context("controller construction failed")?;

    let mut samples = JsonLinesSource::new(BufReader::new(io::stdin().lock()));
    let mut commands = JsonLinesSink::new(io::stdout().lock());
    let mut sink = LogEventSink::new();

    service.run(&mut samples, &mut commands, &mut sink);

    if samples.skipped() > 0 {
        warn!("{} malformed input lines skipped", samples.skipped());
    }
    if commands.failed() {
        anyhow::bail!("output stream closed before the input ended");
    }
    Ok(())
}
