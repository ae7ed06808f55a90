//! Progress indicators for one-shot commands

pub mod spinner;
