//! Use cases (application services)
//!
//! - [`send_message`] — validate and send one chat message
//! - [`session_client`] — list, create, switch and delete sessions
//! - [`render_message`] — turn a role + content pair into a bubble
//! - [`chat_controller`] — the actor that binds user intents to all of the above
//! - [`deferred`] — cancellable timers for debounced and delayed effects

pub mod chat_controller;
pub mod deferred;
pub mod render_message;
pub mod send_message;
pub mod session_client;

#[cfg(test)]
pub(crate) mod testing;
