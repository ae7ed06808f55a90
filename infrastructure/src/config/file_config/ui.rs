//! UI configuration from TOML (`[ui]` section)

use docchat_domain::MarkupMode;
use serde::{Deserialize, Serialize};

/// Terminal UI settings
///
/// # Example
///
/// ```toml
/// [ui]
/// narrow_width = 100
/// sidebar_open = true
/// markup = "escaped"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUiConfig {
    /// Below this many columns the sidebar overlays the conversation and
    /// a click outside it closes it
    pub narrow_width: u16,
    /// Whether the sidebar starts open
    pub sidebar_open: bool,
    /// HTML rendering for `--output html`
    pub markup: MarkupMode,
}

impl Default for FileUiConfig {
    fn default() -> Self {
        Self {
            narrow_width: 100,
            sidebar_open: true,
            markup: MarkupMode::default(),
        }
    }
}
