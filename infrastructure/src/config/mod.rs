//! Configuration file loading for docchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DOCCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./docchat.toml` or `./.docchat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/docchat/config.toml`
//! 5. Default values
//!
//! `--server` on the command line is applied by the binary after loading.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileServerConfig, FileTimingConfig,
    FileUiConfig,
};
pub use loader::ConfigLoader;
