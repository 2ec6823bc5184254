//! API layer for geoquiz.
//!
//! This module exposes the session store and quiz dataset to a UI over
//! REST and WebSocket.
//!
//! ## Endpoints
//!
//! ### Health & Info
//! - `GET /health` - Health check
//! - `GET /api/v1/` - API information
//!
//! ### Session
//! - `GET /api/v1/session` - Current display name
//! - `PUT /api/v1/session` - Overwrite the display name
//! - `POST /api/v1/session/sign-in` - Email/password sign-in
//! - `POST /api/v1/session/sign-out` - End the session
//! - `WS /api/v1/session/ws` - Live display name updates
//!
//! ### Quiz
//! - `GET /api/v1/quiz` - Shuffled question set
//! - `POST /api/v1/quiz/grade` - Score submitted answers
//!
//! ## Example
//!
//! ```no_run
//! use geoquiz::api::{serve, AppState, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> geoquiz::Result<()> {
//!     serve(ServerConfig::new("127.0.0.1", 3000), AppState::default()).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;
pub mod websocket;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, ServerConfig};
pub use types::{
    ErrorResponse, GradeRequest, QuizResponse, SessionResponse, SetDisplayNameRequest,
    SignInRequest, SignInResponse, WsMessage,
};
