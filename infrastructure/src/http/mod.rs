//! HTTP adapter for the chat server
//!
//! - [`transport::HttpTransport`]: JSON requests with a cookie store
//! - [`api::HttpChatApi`]: the six `/api/*` endpoints as a [`ChatApi`](docchat_application::ChatApi)

pub mod api;
pub mod error;
pub mod transport;
