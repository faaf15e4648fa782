//! # Session Guard
//!
//! Keeps [`AppState`] and the [`SessionStore`] in step:
//!
//! - [`restore`] loads a saved session at startup
//! - [`persist`] saves a fresh sign-in
//! - [`guard`] watches results of authenticated calls; on
//!   [`ClientError::Unauthorized`] it clears the store, logs the user out and
//!   sends them to registration
//!
//! Store failures never block the user: they are logged and the session
//! simply lives in memory for this run.

use crate::app::state::{Action, AppState, Screen};
use crate::core::error::{ClientError, Result};
use crate::core::service::{PersistedSession, SessionStore};
use shared::AuthResponse;

/// Initial state, signed in when the store holds a session.
pub fn restore(store: &dyn SessionStore) -> AppState {
    let mut state = AppState::default();

    match store.load() {
        Ok(Some(session)) => {
            tracing::info!(user_id = %session.user.id, "Session restored");
            state.apply(Action::LoggedIn {
                user: session.user,
                token: session.token,
            });
        }
        Ok(None) => tracing::debug!("No saved session"),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable session");
            if let Err(e) = store.clear() {
                tracing::error!(error = %e, "Failed to clear session store");
            }
        }
    }

    state
}

/// Record a successful sign-in in the store and the state.
pub fn persist(store: &dyn SessionStore, state: &mut AppState, auth: AuthResponse) {
    let session = PersistedSession {
        token: auth.token,
        user: auth.user,
    };

    if let Err(e) = store.save(&session) {
        tracing::error!(error = %e, "Failed to save session; it will not survive a restart");
    }

    state.apply(Action::LoggedIn {
        user: session.user,
        token: session.token,
    });
}

/// Drop the session everywhere.
pub fn end(store: &dyn SessionStore, state: &mut AppState) {
    if let Err(e) = store.clear() {
        tracing::error!(error = %e, "Failed to clear session store");
    }
    state.apply(Action::Logout);
}

/// Pass `result` through; an `Unauthorized` error also ends the session and
/// navigates to registration.
pub fn guard<T>(result: Result<T>, store: &dyn SessionStore, state: &mut AppState) -> Result<T> {
    if let Err(ClientError::Unauthorized) = &result {
        tracing::warn!("Session rejected by backend, signing out");
        end(store, state);
        state.apply(Action::Navigate(Screen::Register));
    }
    result
}
