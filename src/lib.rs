use std::path::Path;
use std::sync::Arc;

pub mod api;
pub mod controllers;
pub mod credentials;
pub mod error;
pub mod http;
pub mod models;
pub mod upload;

pub use error::{ApiError, SetupError};

use api::{
    AuthService, BooksService, CollegesService, PapersService, SettingsService, UsersService,
};
use controllers::{
    AuthController, BooksController, CollegesController, PapersController, SettingsController,
    UsersController,
};
use credentials::CredentialStore;
use http::ApiClient;

/// The wired-up admin client: one shared HTTP client, one controller per
/// resource, and the credential store under the auth controller. The
/// backend is the source of truth; the controllers' lists are a
/// best-effort session cache, never persisted.
pub struct AdminClient {
    pub auth: AuthController<AuthService>,
    pub books: BooksController<BooksService>,
    pub papers: PapersController<PapersService>,
    pub colleges: CollegesController,
    pub users: UsersController,
    pub settings: SettingsController,
}

impl AdminClient {
    pub fn connect(base_url: &str, data_dir: &Path) -> Result<Self, SetupError> {
        let http = Arc::new(ApiClient::new(base_url)?);
        let store = CredentialStore::open(data_dir)?;

        Ok(AdminClient {
            auth: AuthController::new(AuthService::new(http.clone()), http.clone(), store),
            books: BooksController::new(BooksService::new(http.clone())),
            papers: PapersController::new(PapersService::new(http.clone())),
            colleges: CollegesController::new(CollegesService::new(http.clone())),
            users: UsersController::new(UsersService::new(http.clone())),
            settings: SettingsController::new(SettingsService::new(http)),
        })
    }
}
