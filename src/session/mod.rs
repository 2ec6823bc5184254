//! Session management module.
//!
//! This module holds the signed-in user's display name in a reactive
//! [`SessionStore`] and wires it to an identity backend through
//! [`AuthContext`].

mod context;
mod store;

pub use context::{AuthContext, AuthMode};
pub use store::{SessionStore, SessionWatcher};
