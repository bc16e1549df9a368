//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter         | Implements   | Connects to          |
//! |-----------------|--------------|----------------------|
//! | `json_lines`    | SamplePort   | JSON lines on stdin  |
//! |                 | CommandPort  | JSON lines on stdout |
//! | `log_sink`      | EventSink    | `log` facade         |
//! | `logging`       | log backend  | stderr (`tracing`)   |

pub mod json_lines;
pub mod log_sink;
pub mod logging;
