//! Transient notification lifecycle

/// Visibility phase of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    FadingIn,
    Visible,
    FadingOut,
}

impl ToastPhase {
    /// Phase after this one, or `None` once the toast should be removed
    pub fn next(self) -> Option<ToastPhase> {
        match self {
            ToastPhase::FadingIn => Some(ToastPhase::Visible),
            ToastPhase::Visible => Some(ToastPhase::FadingOut),
            ToastPhase::FadingOut => None,
        }
    }
}

/// A single on-screen notification
///
/// `generation` distinguishes a toast from the one it replaced, so a timer
/// armed for an old toast cannot advance a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub phase: ToastPhase,
    pub generation: u64,
}

impl Toast {
    pub fn new(message: impl Into<String>, generation: u64) -> Self {
        Self {
            message: message.into(),
            phase: ToastPhase::FadingIn,
            generation,
        }
    }
}
