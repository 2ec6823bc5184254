//! Auth context: the session store wired to an identity backend.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::SessionStore;
use crate::identity::{IdentityProvider, Principal};
use crate::Result;

/// Which auth wiring a context was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Backed by an external identity service.
    Remote,
    /// Purely in-memory; sign-out only clears local state.
    Local,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Remote => "remote",
            AuthMode::Local => "local",
        }
    }
}

/// Owns the session store and, in remote mode, the identity provider.
///
/// Build one per process and hand out clones; all clones share the same
/// store and provider.
#[derive(Clone)]
pub struct AuthContext {
    store: SessionStore,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl AuthContext {
    /// Context backed by an external identity service.
    pub fn remote(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store: SessionStore::new(),
            identity: Some(identity),
        }
    }

    /// Context with no identity service at all.
    pub fn local() -> Self {
        Self {
            store: SessionStore::new(),
            identity: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        if self.identity.is_some() {
            AuthMode::Remote
        } else {
            AuthMode::Local
        }
    }

    /// Name of the identity provider, or `"local"`.
    pub fn backend_name(&self) -> &'static str {
        self.identity.as_ref().map_or("local", |i| i.name())
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Ask the identity service who is signed in and update the store.
    ///
    /// Sets the display name only when the principal has an email with a
    /// non-empty local part. Returns the name that was applied, if any.
    /// Query failures are returned as-is; the store is untouched.
    pub async fn resolve_current_identity(&self) -> Result<Option<String>> {
        let Some(identity) = &self.identity else {
            return Ok(None);
        };

        let principal = identity.current_principal().await?;
        let name = principal.as_ref().and_then(Principal::display_name);

        match &name {
            Some(name) => {
                info!(provider = identity.name(), display_name = %name, "identity resolved");
                self.store.set_display_name(name.clone());
            }
            None => info!(provider = identity.name(), "no signed-in principal"),
        }

        Ok(name)
    }

    /// Run [`resolve_current_identity`](Self::resolve_current_identity) in
    /// the background.
    ///
    /// The caller is not blocked; the outcome, including failure, is
    /// delivered through the returned handle.
    pub fn spawn_identity_resolution(&self) -> JoinHandle<Result<Option<String>>> {
        let ctx = self.clone();
        tokio::spawn(async move { ctx.resolve_current_identity().await })
    }

    /// Sign in through the identity service and record the display name.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Principal> {
        let Some(identity) = &self.identity else {
            return Err(crate::GeoQuizError::Unsupported("password sign-in"));
        };

        let principal = identity.sign_in_with_password(email, password).await?;
        if let Some(name) = principal.display_name() {
            self.store.set_display_name(name);
        }
        info!(provider = identity.name(), uid = %principal.uid, "signed in");
        Ok(principal)
    }

    /// End the session.
    ///
    /// In remote mode the identity service is asked to terminate the session
    /// first; if that fails the error is returned and the store keeps its
    /// value. The store is cleared once termination is acknowledged, or
    /// immediately in local mode.
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(identity) = &self.identity {
            if let Err(e) = identity.terminate_session().await {
                warn!(provider = identity.name(), error = %e, "sign-out failed");
                return Err(e);
            }
        }

        self.store.clear();
        info!(mode = self.mode().as_str(), "signed out");
        Ok(())
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("mode", &self.mode())
            .field("backend", &self.backend_name())
            .field("display_name", &self.store.display_name())
            .finish()
    }
}
