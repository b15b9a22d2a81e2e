use std::sync::Arc;

use crate::api::AuthApi;
use crate::controllers::store::Subscribers;
use crate::credentials::{CredentialStore, StoredSession};
use crate::http::ApiClient;
use crate::models::Role;

/// Holds the signed-in session and keeps the credential store and the
/// shared HTTP client's bearer token in step with it. Does not refresh
/// tokens: an expired or rejected token means signing in again.
pub struct AuthController<S: AuthApi> {
    service: S,
    http: Arc<ApiClient>,
    store: CredentialStore,
    session: Option<StoredSession>,
    last_error: Option<String>,
    subscribers: Subscribers,
}

impl<S: AuthApi> AuthController<S> {
    /// Restores a persisted session when one is still valid, so a
    /// restarted client picks up where it left off without a login.
    pub fn new(service: S, http: Arc<ApiClient>, store: CredentialStore) -> Self {
        let session = match store.load_session() {
            Ok(Some(stored)) if stored.is_valid() => {
                http.set_token(&stored.token);
                Some(stored)
            }
            Ok(_) => None,
            Err(err) => {
                log::warn!("reading stored session failed: {}", err);
                None
            }
        };

        AuthController {
            service,
            http,
            store,
            session,
            last_error: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn session(&self) -> Option<&StoredSession> {
        self.session.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|session| session.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .map(StoredSession::is_valid)
            .unwrap_or(false)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.subscribers.subscribe(listener);
    }

    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let ok = match self.service.login(email, password) {
            Ok(auth) => {
                let stored = StoredSession {
                    token: auth.token.clone(),
                    user_id: auth.user_id,
                    role: auth.role,
                    expires_at: auth.expires_at,
                };
                self.http.set_token(&stored.token);
                if let Err(err) = self.store.save_session(&stored) {
                    // Session still works for this run; it just will not
                    // survive a restart.
                    log::warn!("persisting session failed: {}", err);
                }
                self.session = Some(stored);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("login failed: {}", err);
                self.last_error = Some(format!("sign-in failed: {}", err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }

    /// Local sign-out always completes; the server-side logout call is
    /// advisory.
    pub fn logout(&mut self) {
        if let Err(err) = self.service.logout() {
            log::warn!("server logout failed: {}", err);
        }
        self.http.clear_token();
        if let Err(err) = self.store.clear() {
            log::warn!("clearing stored session failed: {}", err);
        }
        self.session = None;
        self.last_error = None;
        self.subscribers.notify();
    }
}
