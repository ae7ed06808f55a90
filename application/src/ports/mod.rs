//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod chat_api;
pub mod clipboard;
pub mod confirmation;
pub mod ui_event;
