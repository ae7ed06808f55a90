//! Application layer for docchat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::UiTiming;
pub use ports::{
    chat_api::{ApiError, ChatApi, ChatReply},
    clipboard::{ClipboardError, ClipboardPort},
    confirmation::{AutoConfirm, ConfirmationError, ConfirmationPort},
    ui_event::UiEvent,
};
pub use use_cases::chat_controller::{ChatCommand, ChatController};
pub use use_cases::deferred::{DeferredTask, TimerSlot};
pub use use_cases::render_message::MessageRenderer;
pub use use_cases::send_message::{SendMessageError, SendMessageUseCase};
pub use use_cases::session_client::{
    DeleteOutcome, NewConversation, OpenedSession, Removal, SessionClient, SessionError,
};
