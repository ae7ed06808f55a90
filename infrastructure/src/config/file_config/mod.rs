//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod server;
mod timing;
mod ui;

pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;
pub use timing::FileTimingConfig;
pub use ui::FileUiConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("server.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("server.base_url is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("server.request_timeout_secs cannot be 0")]
    ZeroRequestTimeout,

    #[error("ui.narrow_width cannot be 0")]
    ZeroNarrowWidth,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat server connection
    pub server: FileServerConfig,
    /// Terminal UI settings
    pub ui: FileUiConfig,
    /// Deferred effect delays
    pub timing: FileTimingConfig,
    /// Log file location
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        match reqwest::Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string())),
        }

        if let Some(0) = self.server.request_timeout_secs {
            return Err(ConfigValidationError::ZeroRequestTimeout);
        }

        if self.ui.narrow_width == 0 {
            return Err(ConfigValidationError::ZeroNarrowWidth);
        }

        Ok(())
    }
}
