//! REST API handlers.

use axum::{extract::State, http::StatusCode, Json};

use super::types::{
    ErrorResponse, GradeRequest, QuizResponse, SessionResponse, SetDisplayNameRequest,
    SignInRequest, SignInResponse,
};
use crate::error::GeoQuizError;
use crate::quiz::{self, Score};
use crate::session::AuthContext;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: AuthContext,
}

impl AppState {
    pub fn new(auth: AuthContext) -> Self {
        Self { auth }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AuthContext::local())
    }
}

fn api_error(e: GeoQuizError) -> ApiError {
    match e {
        GeoQuizError::Unsupported(what) => (
            StatusCode::NOT_IMPLEMENTED,
            Json(ErrorResponse::not_supported(format!("{what} is not available"))),
        ),
        GeoQuizError::Identity(msg) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::identity_error(msg)),
        ),
        GeoQuizError::Http(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::identity_error(e.to_string())),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal_error(other.to_string())),
        ),
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "geoquiz",
        "version": env!("CARGO_PKG_VERSION"),
        "auth_backend": state.auth.backend_name(),
        "status": "running"
    }))
}

/// Current session.
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse::from_store(state.auth.store()))
}

/// Overwrite the display name.
pub async fn set_session(
    State(state): State<AppState>,
    Json(req): Json<SetDisplayNameRequest>,
) -> Json<SessionResponse> {
    state.auth.store().set_display_name(req.display_name);
    Json(SessionResponse::from_store(state.auth.store()))
}

/// Sign in with email and password through the identity service.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, ApiError> {
    let principal = state
        .auth
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(api_error)?;

    Ok(Json(SignInResponse {
        uid: principal.uid,
        display_name: state.auth.store().display_name(),
    }))
}

/// End the session.
pub async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.auth.sign_out().await.map_err(|e| match e {
        GeoQuizError::Identity(msg) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::identity_error(msg)),
        ),
        other => api_error(other),
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// The shuffled question set.
pub async fn get_quiz() -> Json<QuizResponse> {
    Json(QuizResponse::new(quiz::questions()))
}

/// Grade submitted answers against the question set.
pub async fn grade_quiz(Json(req): Json<GradeRequest>) -> Json<Score> {
    Json(quiz::grade(quiz::questions(), &req.answers))
}
