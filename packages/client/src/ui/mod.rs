//! Terminal UI of the monitoring client.

mod formatter;
mod input;
mod monitor;

pub use formatter::MonitorFormatter;
pub use input::{Command, parse_command, spawn_input_thread};
pub use monitor::{MonitorConfig, run_monitor};
