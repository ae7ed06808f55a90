//! UI timing — delays for deferred controller effects.
//!
//! [`UiTiming`] groups every timer the
//! [`ChatController`](crate::use_cases::chat_controller::ChatController)
//! arms. These are presentation pacing, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays for debounce, follow-up chips, focus return and toast phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTiming {
    /// Quiet period after the last search keystroke before filtering
    pub filter_debounce: Duration,
    /// Delay between an assistant reply and its follow-up chips
    pub follow_up_delay: Duration,
    /// Delay before returning focus to the composer after a send
    pub focus_delay: Duration,
    pub toast_fade_in: Duration,
    pub toast_hold: Duration,
    pub toast_fade_out: Duration,
}

impl Default for UiTiming {
    fn default() -> Self {
        Self {
            filter_debounce: Duration::from_millis(300),
            follow_up_delay: Duration::from_millis(1000),
            focus_delay: Duration::from_millis(100),
            toast_fade_in: Duration::from_millis(100),
            toast_hold: Duration::from_millis(3000),
            toast_fade_out: Duration::from_millis(300),
        }
    }
}

impl UiTiming {
    // ==================== Builder Methods ====================

    pub fn with_filter_debounce(mut self, delay: Duration) -> Self {
        self.filter_debounce = delay;
        self
    }

    pub fn with_follow_up_delay(mut self, delay: Duration) -> Self {
        self.follow_up_delay = delay;
        self
    }

    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    pub fn with_toast(mut self, fade_in: Duration, hold: Duration, fade_out: Duration) -> Self {
        self.toast_fade_in = fade_in;
        self.toast_hold = hold;
        self.toast_fade_out = fade_out;
        self
    }
}
