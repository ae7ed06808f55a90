//! Infrastructure layer for docchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod clipboard;
pub mod config;
pub mod http;

// Re-export commonly used types
pub use clipboard::SystemClipboard;
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileServerConfig,
    FileTimingConfig, FileUiConfig,
};
pub use http::{
    api::HttpChatApi,
    error::TransportError,
    transport::{HttpTransport, Method, RequestOptions, TransportSettings},
};
