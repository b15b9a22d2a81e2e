use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub mod auth;
pub mod books;
pub mod colleges;
pub mod papers;
pub mod settings;
pub mod users;

pub use auth::{AuthApi, AuthService};
pub use books::{BookFilters, BooksApi, BooksService};
pub use colleges::CollegesService;
pub use papers::{PaperFilters, PapersApi, PapersService};
pub use settings::SettingsService;
pub use users::{UserFilters, UsersService};

/// Fixed multipart field name the upload endpoints read the payload from.
pub(crate) const UPLOAD_FIELD: &str = "file";

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) fn encode<T: Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}
