//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Where and how to reach the chat server
///
/// # Example
///
/// ```toml
/// [server]
/// base_url = "http://localhost:5001"
/// request_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL the `/api/*` paths are joined onto
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Per-request timeout; no timeout when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            user_agent: concat!("docchat/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}
