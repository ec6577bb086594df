//! CLI argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod watch;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
pub use commands::{CommandError, run};
pub use watch::{WatchOutcome, watch};
