//! Timing configuration from TOML (`[timing]` section)

use docchat_application::UiTiming;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays of the deferred UI effects, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimingConfig {
    pub filter_debounce_ms: u64,
    pub follow_up_delay_ms: u64,
    pub focus_delay_ms: u64,
    pub toast_fade_in_ms: u64,
    pub toast_hold_ms: u64,
    pub toast_fade_out_ms: u64,
}

impl Default for FileTimingConfig {
    fn default() -> Self {
        Self {
            filter_debounce_ms: 300,
            follow_up_delay_ms: 1000,
            focus_delay_ms: 100,
            toast_fade_in_ms: 100,
            toast_hold_ms: 3000,
            toast_fade_out_ms: 300,
        }
    }
}

impl FileTimingConfig {
    pub fn to_ui_timing(&self) -> UiTiming {
        UiTiming::default()
            .with_filter_debounce(Duration::from_millis(self.filter_debounce_ms))
            .with_follow_up_delay(Duration::from_millis(self.follow_up_delay_ms))
            .with_focus_delay(Duration::from_millis(self.focus_delay_ms))
            .with_toast(
                Duration::from_millis(self.toast_fade_in_ms),
                Duration::from_millis(self.toast_hold_ms),
                Duration::from_millis(self.toast_fade_out_ms),
            )
    }
}
