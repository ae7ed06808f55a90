//! UI event types emitted by ChatController for presentation layer rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer. The view-model snapshot is the whole picture; the
//! other variants are one-off effects on the composer or a modal.

use docchat_domain::ChatViewModel;

/// Events emitted by ChatController for the presentation layer to render
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Fresh snapshot of the view-model after a mutation
    View(Box<ChatViewModel>),
    /// Return input focus to the composer
    FocusComposer,
    /// Replace the composer text (edit action)
    FillComposer(String),
    /// Blocking alert the user must dismiss
    Alert(String),
    /// Controller stopped
    Exit,
}
