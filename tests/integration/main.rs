//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock ports.  No simulator is required.

mod drive_service_tests;
mod mock_ports;
mod scenario_tests;
