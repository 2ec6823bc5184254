//! In-process identity service.

use std::sync::{PoisonError, RwLock};

use futures_util::future::BoxFuture;

use super::{IdentityProvider, Principal};
use crate::Result;

/// Identity provider that keeps the signed-in principal in memory.
///
/// Useful as a development backend and as a stand-in for the remote service
/// in tests. Password sign-in accepts any password.
#[derive(Debug, Default)]
pub struct MemoryIdentity {
    principal: RwLock<Option<Principal>>,
}

impl MemoryIdentity {
    /// Create a provider with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with the given principal already signed in.
    pub fn signed_in(principal: Principal) -> Self {
        Self {
            principal: RwLock::new(Some(principal)),
        }
    }

    /// Replace the signed-in principal. Recovers from a poisoned lock.
    pub fn set_principal(&self, principal: Option<Principal>) {
        *self.principal.write().unwrap_or_else(PoisonError::into_inner) = principal;
    }

    /// Snapshot of the signed-in principal.
    pub fn principal(&self) -> Option<Principal> {
        self.principal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl IdentityProvider for MemoryIdentity {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn current_principal(&self) -> BoxFuture<'_, Result<Option<Principal>>> {
        Box::pin(async move { Ok(self.principal()) })
    }

    fn terminate_session(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.set_principal(None);
            Ok(())
        })
    }

    fn sign_in_with_password<'a>(
        &'a self,
        email: &'a str,
        _password: &'a str,
    ) -> BoxFuture<'a, Result<Principal>> {
        Box::pin(async move {
            let principal = Principal::new(format!("mem-{email}"), Some(email.to_string()));
            self.set_principal(Some(principal.clone()));
            Ok(principal)
        })
    }
}
