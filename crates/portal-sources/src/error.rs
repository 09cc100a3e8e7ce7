//! Error types for portal-sources

use portal_core::RecordKind;
use thiserror::Error;

/// Shown when the server gives no usable message
pub const GENERIC_FAILURE_MESSAGE: &str = "The operation could not be completed. Please try again.";

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected payload: {0}")]
    Unusable(String),

    #[error("{} not found: {id}", .kind.label())]
    NotFound { kind: RecordKind, id: String },

    #[error("Invalid record: {0}")]
    Invalid(String),
}

impl SourceError {
    /// Text suitable for a notification: the server's message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            SourceError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            SourceError::NotFound { .. } | SourceError::Invalid(_) => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// The backend could not be reached or is failing as a whole
    pub fn is_unavailable(&self) -> bool {
        match self {
            SourceError::Transport(_) => true,
            SourceError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = SourceError::Http {
            status: 422,
            message: Some("El correo ya está registrado".to_string()),
        };
        assert_eq!(err.user_message(), "El correo ya está registrado");
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let err = SourceError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), "HTTP error 500: no message");
    }

    #[test]
    fn test_not_found_message() {
        let err = SourceError::NotFound {
            kind: RecordKind::Ticket,
            id: "t9".to_string(),
        };
        assert_eq!(err.user_message(), "Ticket not found: t9");
    }
}
