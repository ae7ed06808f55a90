//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Unknown message role: {0}")]
    UnknownRole(String),

    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),
}

impl DomainError {
    /// Whether this error came from user input rather than server data
    pub fn is_user_input(&self) -> bool {
        matches!(self, DomainError::EmptyMessage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyMessage.to_string(), "Message is empty");
        assert_eq!(
            DomainError::UnknownRole("system".into()).to_string(),
            "Unknown message role: system"
        );
    }

    #[test]
    fn test_is_user_input() {
        assert!(DomainError::EmptyMessage.is_user_input());
        assert!(!DomainError::UnknownRole("x".into()).is_user_input());
        assert!(!DomainError::InvalidSessionId(String::new()).is_user_input());
    }
}
