//! Firebase Authentication over the Identity Toolkit REST API.

use futures_util::future::BoxFuture;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{IdentityProvider, Principal};
use crate::error::GeoQuizError;
use crate::Result;

/// Default Identity Toolkit endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// Default Secure Token endpoint, used to exchange refresh tokens.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://securetoken.googleapis.com/v1";

/// Connection settings for a Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseSettings {
    /// Web API key of the Firebase project.
    pub api_key: String,
    /// Identity Toolkit base URL.
    pub endpoint: String,
    /// Secure Token base URL.
    pub token_endpoint: String,
    /// ID token of an already signed-in user.
    pub id_token: Option<String>,
    /// Refresh token paired with `id_token`.
    pub refresh_token: Option<String>,
}

impl FirebaseSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            id_token: None,
            refresh_token: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(token.into());
        self
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    fn url(&self, method: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.endpoint.trim_end_matches('/'),
            method,
            self.api_key
        )
    }

    fn token_url(&self) -> String {
        format!(
            "{}/token?key={}",
            self.token_endpoint.trim_end_matches('/'),
            self.api_key
        )
    }
}

#[derive(Debug, Clone)]
struct Credential {
    id_token: String,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    id_token: String,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
}

/// Secure Token exchange response. Unlike the Identity Toolkit, this
/// endpoint answers in snake_case.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase-backed identity provider.
///
/// Holds the current user's credential the way the browser SDK does;
/// [`IdentityProvider::terminate_session`] drops it. A lookup rejected
/// because the ID token expired is retried once after exchanging the
/// refresh token, when one is held.
#[derive(Debug)]
pub struct FirebaseIdentity {
    settings: FirebaseSettings,
    client: reqwest::Client,
    credential: RwLock<Option<Credential>>,
}

impl FirebaseIdentity {
    pub fn new(settings: FirebaseSettings) -> Self {
        Self::with_client(settings, reqwest::Client::new())
    }

    pub fn with_client(settings: FirebaseSettings, client: reqwest::Client) -> Self {
        let credential = settings.id_token.clone().map(|id_token| Credential {
            id_token,
            refresh_token: settings.refresh_token.clone(),
        });

        Self {
            settings,
            client,
            credential: RwLock::new(credential),
        }
    }

    pub fn settings(&self) -> &FirebaseSettings {
        &self.settings
    }

    /// Whether a credential is currently held.
    pub async fn has_credential(&self) -> bool {
        self.credential.read().await.is_some()
    }

    /// Whether the held credential can be refreshed.
    pub async fn has_refresh_token(&self) -> bool {
        self.credential
            .read()
            .await
            .as_ref()
            .is_some_and(|c| c.refresh_token.is_some())
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        body: serde_json::Value,
    ) -> Result<T> {
        let resp = self.client.post(url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(GeoQuizError::Identity(service_error_message(status, &text)));
        }

        Ok(resp.json::<T>().await?)
    }

    async fn lookup(&self, id_token: &str) -> Result<Option<Principal>> {
        let lookup: LookupResponse = self
            .post(
                self.settings.url("lookup"),
                serde_json::json!({ "idToken": id_token }),
            )
            .await?;

        Ok(lookup
            .users
            .into_iter()
            .next()
            .map(|u| Principal::new(u.local_id, u.email)))
    }

    /// Exchange `refresh_token` for a new ID token and store the result.
    ///
    /// The stored credential is only replaced if it still carries the same
    /// refresh token, so a sign-out during the exchange stays signed out.
    async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let resp: RefreshResponse = self
            .post(
                self.settings.token_url(),
                serde_json::json!({
                    "grant_type": "refresh_token",
                    "refresh_token": refresh_token,
                }),
            )
            .await?;

        let mut credential = self.credential.write().await;
        if let Some(current) = credential.as_mut() {
            if current.refresh_token.as_deref() == Some(refresh_token) {
                current.id_token = resp.id_token.clone();
                current.refresh_token = Some(resp.refresh_token);
            }
        }
        tracing::debug!("firebase id token refreshed");

        Ok(resp.id_token)
    }
}

fn service_error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => format!("{status}: {body}"),
    }
}

/// Whether the service rejected the ID token itself, rather than the user.
fn is_stale_token(message: &str) -> bool {
    message.starts_with("TOKEN_EXPIRED") || message.starts_with("INVALID_ID_TOKEN")
}

impl IdentityProvider for FirebaseIdentity {
    fn name(&self) -> &'static str {
        "firebase"
    }

    fn current_principal(&self) -> BoxFuture<'_, Result<Option<Principal>>> {
        Box::pin(async move {
            let (token, refresh_token) = match self.credential.read().await.as_ref() {
                Some(c) => (c.id_token.clone(), c.refresh_token.clone()),
                None => return Ok(None),
            };

            match (self.lookup(&token).await, refresh_token) {
                (Err(GeoQuizError::Identity(reason)), Some(refresh_token))
                    if is_stale_token(&reason) =>
                {
                    tracing::debug!(%reason, "id token rejected, refreshing");
                    let fresh = self.refresh(&refresh_token).await?;
                    self.lookup(&fresh).await
                }
                (result, _) => result,
            }
        })
    }

    fn terminate_session(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.credential.write().await.take();
            tracing::debug!("firebase credential dropped");
            Ok(())
        })
    }

    fn sign_in_with_password<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Principal>> {
        Box::pin(async move {
            let resp: SignInResponse = self
                .post(
                    self.settings.url("signInWithPassword"),
                    serde_json::json!({
                        "email": email,
                        "password": password,
                        "returnSecureToken": true,
                    }),
                )
                .await?;

            *self.credential.write().await = Some(Credential {
                id_token: resp.id_token,
                refresh_token: resp.refresh_token,
            });

            Ok(Principal::new(resp.local_id, resp.email))
        })
    }
}
