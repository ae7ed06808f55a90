//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot replies and session listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured terminal text
    Text,
    /// Bubble markup, as the web client renders it
    Html,
    /// JSON output
    Json,
}

/// CLI arguments for docchat
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(author, version, about = "Terminal client for a document-aware chat assistant")]
#[command(long_about = r#"
docchat talks to a document-aware chat server. Without a message it opens a
full-screen chat with a session sidebar; with a message it sends it once and
prints the reply.

Configuration files are loaded from (in priority order):
1. DOCCHAT_* environment variables (e.g. DOCCHAT_SERVER__BASE_URL)
2. --config <path>                     Explicit config file
3. ./docchat.toml or ./.docchat.toml   Project-level config
4. ~/.config/docchat/config.toml       Global config

Example:
  docchat
  docchat "Summarise the lease agreement"
  docchat --sessions -o json
  docchat --server http://10.0.0.5:5001 "What changed in v2?"
"#)]
pub struct Cli {
    /// Message to send; opens the interactive UI when omitted
    pub message: Option<String>,

    /// Chat server base URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Print the session list and exit
    #[arg(long, conflicts_with = "message")]
    pub sessions: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether this invocation runs the full-screen UI
    pub fn is_interactive(&self) -> bool {
        self.message.is_none() && !self.sessions && !self.show_config
    }
}
