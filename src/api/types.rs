//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::quiz::{Answer, QuizQuestion};
use crate::session::SessionStore;

/// Current session as seen by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub display_name: String,
    pub signed_in: bool,
}

impl SessionResponse {
    pub fn from_store(store: &SessionStore) -> Self {
        let display_name = store.display_name();
        Self {
            signed_in: !display_name.is_empty(),
            display_name,
        }
    }
}

/// Request to overwrite the display name.
#[derive(Debug, Clone, Deserialize)]
pub struct SetDisplayNameRequest {
    #[serde(default)]
    pub display_name: String,
}

/// Email/password sign-in request.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub uid: String,
    pub display_name: String,
}

/// The question set in serving order.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub count: usize,
    pub questions: Vec<QuizQuestion>,
}

impl QuizResponse {
    pub fn new(questions: &[QuizQuestion]) -> Self {
        Self {
            count: questions.len(),
            questions: questions.to_vec(),
        }
    }
}

/// Answers submitted for grading.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "IDENTITY_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new("NOT_SUPPORTED", message)
    }

    pub fn identity_error(message: impl Into<String>) -> Self {
        Self::new("IDENTITY_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// Server pushes the current display name.
    Session { display_name: String },
    /// Client overwrites the display name.
    SetDisplayName { display_name: String },
    /// Error message.
    Error { code: String, message: String },
    /// Ping/pong for connection health.
    Ping,
    Pong,
}
