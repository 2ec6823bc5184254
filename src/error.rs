//! Error types for geoquiz.

use thiserror::Error;

/// Main error type for geoquiz operations.
#[derive(Error, Debug)]
pub enum GeoQuizError {
    /// The identity service rejected the request.
    #[error("identity service error: {0}")]
    Identity(String),

    /// Transport failure while talking to the identity service.
    #[error("identity transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured identity provider does not support this operation.
    #[error("operation not supported by identity provider: {0}")]
    Unsupported(&'static str),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio::task::JoinError> for GeoQuizError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

/// Convenience Result type for geoquiz operations.
pub type Result<T> = std::result::Result<T, GeoQuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display() {
        let err = GeoQuizError::Identity("INVALID_ID_TOKEN".into());
        assert!(err.to_string().contains("identity service"));
        assert!(err.to_string().contains("INVALID_ID_TOKEN"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = GeoQuizError::Unsupported("sign-in");
        assert!(err.to_string().contains("not supported"));
        assert!(err.to_string().contains("sign-in"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: GeoQuizError = io_err.into();
        assert!(matches!(err, GeoQuizError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[tokio::test]
    async fn test_join_error_conversion() {
        let handle = tokio::spawn(async { panic!("boom") });
        let join_err = handle.await.unwrap_err();
        let err: GeoQuizError = join_err.into();
        assert!(matches!(err, GeoQuizError::Task(_)));
    }
}
