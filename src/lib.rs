//! # geoquiz
//!
//! Session store, identity wiring and quiz dataset for a map/quiz web app.
//!
//! The crate keeps track of who is signed in as a reactive display name,
//! resolves that name from an identity service (Firebase Authentication or
//! nothing at all), and serves a fixed trivia set shuffled once per process.
//!
//! ## Features
//!
//! - **Reactive session**: a [`SessionStore`] that pushes every change to
//!   its subscribers
//! - **Pluggable identity**: Firebase-backed or purely local auth, chosen at
//!   startup through [`AuthContext`]
//! - **Quiz dataset**: ten questions in a stable, uniformly shuffled order
//! - **HTTP API**: REST and WebSocket endpoints for a UI layer
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use geoquiz::{AuthContext, FirebaseIdentity, FirebaseSettings};
//!
//! #[tokio::main]
//! async fn main() -> geoquiz::Result<()> {
//!     geoquiz::logging::try_init().ok();
//!
//!     let identity = FirebaseIdentity::new(FirebaseSettings::new("api-key"));
//!     let auth = AuthContext::remote(Arc::new(identity));
//!
//!     // Resolve in the background; the handle reports failures.
//!     let resolution = auth.spawn_identity_resolution();
//!     if let Some(name) = resolution.await?? {
//!         println!("signed in as {}", name);
//!     }
//!
//!     for q in geoquiz::quiz::questions() {
//!         println!("{} {:?}", q.question, q.options);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod quiz;
pub mod session;

// Re-export commonly used types
pub use error::{GeoQuizError, Result};
pub use identity::{FirebaseIdentity, FirebaseSettings, IdentityProvider, MemoryIdentity, Principal};
pub use quiz::{QuestionSet, QuizQuestion};
pub use session::{AuthContext, AuthMode, SessionStore, SessionWatcher};
