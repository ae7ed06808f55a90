//! Presentation layer for docchat
//!
//! This crate contains the CLI definition, console output formatting, the
//! one-shot spinner and the full-screen terminal UI.

pub mod cli;
pub mod output;
pub mod progress;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::spinner::Spinner;
pub use tui::{TuiApp, TuiSettings};
