//! Reactive storage for the signed-in user's display name.

use std::sync::Arc;

use tokio::sync::watch;

/// Receiver side of a [`SessionStore`] subscription.
pub type SessionWatcher = watch::Receiver<String>;

/// Process-wide session state.
///
/// Holds a single display name; an empty string means nobody is signed in.
/// Clones share the same underlying state, and every write is pushed to all
/// subscribers. Concurrent writes are last-write-wins.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<String>>,
}

impl SessionStore {
    /// Create a store with no signed-in user.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx: Arc::new(tx) }
    }

    /// Current display name, or `""` when signed out.
    pub fn display_name(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Overwrite the display name. Any string is accepted.
    pub fn set_display_name(&self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(display_name = %name, "session display name set");
        self.tx.send_replace(name);
    }

    /// Reset the display name to `""`.
    pub fn clear(&self) {
        tracing::debug!("session cleared");
        self.tx.send_replace(String::new());
    }

    /// Whether a non-empty display name is held.
    pub fn is_signed_in(&self) -> bool {
        !self.tx.borrow().is_empty()
    }

    /// Subscribe to display name changes.
    ///
    /// The receiver starts out holding the current value.
    pub fn subscribe(&self) -> SessionWatcher {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
