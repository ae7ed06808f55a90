//! Application-level configuration.
//!
//! - [`UiTiming`] — delays for the controller's deferred effects

pub mod ui_timing;

pub use ui_timing::UiTiming;
