use std::sync::Arc;

use crate::api::{decode, encode};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::AppSettings;

const PATH: &str = "/settings";

pub struct SettingsService {
    http: Arc<ApiClient>,
}

impl SettingsService {
    pub fn new(http: Arc<ApiClient>) -> Self {
        SettingsService { http }
    }

    pub fn get(&self) -> Result<AppSettings, ApiError> {
        decode(self.http.get_json(PATH, &[])?)
    }

    pub fn update(&self, settings: &AppSettings) -> Result<AppSettings, ApiError> {
        decode(self.http.put_json(PATH, &encode(settings)?)?)
    }
}
