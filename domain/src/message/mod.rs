//! Message domain.
//!
//! - [`entities::Message`] — a role + content pair from the server
//! - [`format`] — code-fence and line-break formatting
//! - [`view::MessageView`] — a rendered chat bubble

pub mod entities;
pub mod format;
pub mod view;
