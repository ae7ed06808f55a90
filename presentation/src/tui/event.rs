//! Requests that cross from the controller task into the TUI loop

use tokio::sync::oneshot;

/// A yes/no question the TUI must show as a modal
///
/// The controller awaits `response_tx`; dropping it unanswered reads as a
/// closed channel on the other side.
#[derive(Debug)]
pub struct ConfirmRequest {
    pub prompt: String,
    pub response_tx: oneshot::Sender<bool>,
}
