//! Chat session domain.
//!
//! - [`entities::Session`] — a server-persisted conversation thread
//! - [`entities::SessionId`] — the server-assigned identity
//! - [`filter::filter_sessions`] — sidebar search matching

pub mod entities;
pub mod filter;
