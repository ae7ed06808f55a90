//! Domain layer for docchat
//!
//! This crate contains the entities, value objects and the chat view-model.
//! It has no dependencies on transport, terminal or configuration concerns.
//!
//! # Core Concepts
//!
//! - **Session**: a named, server-persisted conversation thread
//! - **Message**: a role + content pair, rebuilt from server history on load
//! - **ChatViewModel**: the single source of truth the terminal UI projects;
//!   it owns the active session id, the rendered messages and the sidebar list

pub mod chat;
pub mod core;
pub mod message;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use chat::{
    follow_up::{FOLLOW_UP_COUNT, FOLLOW_UP_POOL, pick_follow_ups},
    toast::{Toast, ToastPhase},
    view_model::ChatViewModel,
};
pub use core::{error::DomainError, text};
pub use message::{
    entities::{Message, Role},
    format::{MarkupMode, Segment, escape_html, format_segments, to_html},
    view::{EXPAND_THRESHOLD, MessageView, is_collapsible},
};
pub use session::{
    entities::{Session, SessionId},
    filter::filter_sessions,
};
