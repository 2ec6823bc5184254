//! Identity service boundary.
//!
//! The session layer never talks to an identity backend directly; it goes
//! through [`IdentityProvider`], which is object-safe so a provider can be
//! chosen at runtime and shared as `Arc<dyn IdentityProvider>`.
//!
//! Two providers ship with the crate:
//!
//! - [`FirebaseIdentity`]: Firebase Authentication over its REST API.
//! - [`MemoryIdentity`]: an in-process provider for development and tests.

mod firebase;
mod memory;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::GeoQuizError;
use crate::Result;

pub use firebase::{FirebaseIdentity, FirebaseSettings, DEFAULT_ENDPOINT, DEFAULT_TOKEN_ENDPOINT};
pub use memory::MemoryIdentity;

/// An authenticated user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable user identifier assigned by the service.
    pub uid: String,
    /// Email address, if the account has one.
    pub email: Option<String>,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }

    /// Display name derived from the email, if any.
    pub fn display_name(&self) -> Option<String> {
        self.email.as_deref().and_then(display_name_from_email)
    }
}

/// Derive a display name from an email-like identifier.
///
/// Returns the text before the first `@`, or `None` when that part is empty.
pub fn display_name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next().unwrap_or_default();
    if local.is_empty() {
        None
    } else {
        Some(local.to_string())
    }
}

/// External identity service consumed by the session layer.
pub trait IdentityProvider: Send + Sync {
    /// Short name used in logs and the API info endpoint.
    fn name(&self) -> &'static str;

    /// Query the currently authenticated principal, if any.
    fn current_principal(&self) -> BoxFuture<'_, Result<Option<Principal>>>;

    /// Terminate the current session on the service side.
    fn terminate_session(&self) -> BoxFuture<'_, Result<()>>;

    /// Authenticate with email and password.
    fn sign_in_with_password<'a>(
        &'a self,
        _email: &'a str,
        _password: &'a str,
    ) -> BoxFuture<'a, Result<Principal>> {
        Box::pin(async { Err(GeoQuizError::Unsupported("password sign-in")) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(
            display_name_from_email("alice@example.com"),
            Some("alice".to_string())
        );
    }

    #[test]
    fn test_display_name_splits_on_first_at() {
        assert_eq!(display_name_from_email("a@b@c"), Some("a".to_string()));
    }

    #[test]
    fn test_display_name_without_at() {
        assert_eq!(display_name_from_email("bob"), Some("bob".to_string()));
    }

    #[test]
    fn test_display_name_empty_local_part() {
        assert_eq!(display_name_from_email("@example.com"), None);
        assert_eq!(display_name_from_email(""), None);
    }

    #[test]
    fn test_principal_display_name() {
        let p = Principal::new("uid-1", Some("carol@example.org".into()));
        assert_eq!(p.display_name(), Some("carol".to_string()));

        let anonymous = Principal::new("uid-2", None);
        assert_eq!(anonymous.display_name(), None);
    }

    #[tokio::test]
    async fn test_default_sign_in_unsupported() {
        struct NoSignIn;

        impl IdentityProvider for NoSignIn {
            fn name(&self) -> &'static str {
                "none"
            }

            fn current_principal(&self) -> BoxFuture<'_, Result<Option<Principal>>> {
                Box::pin(async { Ok(None) })
            }

            fn terminate_session(&self) -> BoxFuture<'_, Result<()>> {
                Box::pin(async { Ok(()) })
            }
        }

        let err = NoSignIn
            .sign_in_with_password("a@b.c", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, GeoQuizError::Unsupported(_)));
    }
}
