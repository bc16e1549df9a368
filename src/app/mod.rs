//! Application core: the drive loop, zero I/O.
//!
//! All interaction with the simulator or vehicle happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without a real feed.

pub mod events;
pub mod ports;
pub mod service;
