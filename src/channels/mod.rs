//! Operator-facing channels besides the HTTP/WebSocket surface.

pub mod cli;

pub use cli::{CliCommand, format_snapshot, run_cli};
