//! Output formatting for one-shot commands

pub mod console;
pub mod formatter;
