//! Terminal UI for docchat
//!
//! A ratatui front end over the
//! [`ChatController`](docchat_application::ChatController) actor: the
//! controller owns the chat view-model, the TUI renders its snapshots and
//! turns keys and clicks into commands.

mod app;
mod confirmation;
mod event;
mod mode;
mod state;
mod widgets;

pub use app::{TuiApp, TuiSettings};
pub use confirmation::TuiConfirmation;
pub use event::ConfirmRequest;
pub use mode::{InputMode, KeyAction};
