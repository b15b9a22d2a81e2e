use std::sync::Arc;

use crate::api::{decode, encode, item_path};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{College, CollegeDraft, Page};

const COLLECTION: &str = "/colleges";

pub struct CollegesService {
    http: Arc<ApiClient>,
}

impl CollegesService {
    pub fn new(http: Arc<ApiClient>) -> Self {
        CollegesService { http }
    }

    pub fn create(&self, draft: &CollegeDraft) -> Result<College, ApiError> {
        decode(self.http.post_json(COLLECTION, &encode(draft)?)?)
    }

    pub fn get(&self, id: &str) -> Result<College, ApiError> {
        decode(self.http.get_json(&item_path(COLLECTION, id), &[])?)
    }

    pub fn list(&self, search: Option<&str>, page: u32) -> Result<Page<College>, ApiError> {
        let mut query = vec![("page", page.to_string())];
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        decode(self.http.get_json(COLLECTION, &query)?)
    }

    pub fn update(&self, id: &str, draft: &CollegeDraft) -> Result<College, ApiError> {
        decode(self.http.put_json(&item_path(COLLECTION, id), &encode(draft)?)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&item_path(COLLECTION, id))
    }
}
