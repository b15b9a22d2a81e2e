use std::sync::Arc;

use serde_json::json;

use crate::api::decode;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::AuthSession;

/// Backend seam for authentication, mirroring the books/papers pattern so
/// the auth controller can be driven by a fake in tests.
pub trait AuthApi {
    fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError>;
    fn logout(&self) -> Result<(), ApiError>;
}

pub struct AuthService {
    http: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(http: Arc<ApiClient>) -> Self {
        AuthService { http }
    }
}

impl AuthApi for AuthService {
    fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = json!({ "email": email, "password": password });
        decode(self.http.post_json("/auth/login", &body)?)
    }

    /// Server-side logout is advisory; local sign-out happens either way.
    fn logout(&self) -> Result<(), ApiError> {
        self.http.post_json("/auth/logout", &json!({})).map(|_| ())
    }
}
