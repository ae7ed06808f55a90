//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`] — domain-level errors
//! - [`text`] — fixed user-facing strings

pub mod error;
pub mod text;
