//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for TUI-mode log files.
    /// Defaults to `<data_local_dir>/docchat/logs`.
    pub directory: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Configured directory, or the platform default
    pub fn resolve_directory(&self) -> Option<PathBuf> {
        self.directory
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("docchat").join("logs")))
    }
}
