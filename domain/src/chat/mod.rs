//! Chat view domain.
//!
//! - [`view_model::ChatViewModel`] — everything the terminal UI renders
//! - [`follow_up`] — cosmetic follow-up suggestion chips
//! - [`toast::Toast`] — transient notification lifecycle

pub mod follow_up;
pub mod toast;
pub mod view_model;
