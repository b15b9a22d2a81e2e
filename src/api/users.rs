use std::sync::Arc;

use crate::api::{decode, encode, item_path};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Page, Role, User, UserDraft};

const COLLECTION: &str = "/users";

#[derive(Debug, Clone, Default)]
pub struct UserFilters {
    pub role: Option<Role>,
    pub college_id: Option<String>,
    pub search: Option<String>,
}

impl UserFilters {
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string())];
        if let Some(role) = self.role {
            query.push(("role", role.as_str().to_string()));
        }
        if let Some(college_id) = &self.college_id {
            query.push(("collegeId", college_id.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

pub struct UsersService {
    http: Arc<ApiClient>,
}

impl UsersService {
    pub fn new(http: Arc<ApiClient>) -> Self {
        UsersService { http }
    }

    pub fn create(&self, draft: &UserDraft) -> Result<User, ApiError> {
        decode(self.http.post_json(COLLECTION, &encode(draft)?)?)
    }

    pub fn get(&self, id: &str) -> Result<User, ApiError> {
        decode(self.http.get_json(&item_path(COLLECTION, id), &[])?)
    }

    pub fn list(&self, filters: &UserFilters, page: u32) -> Result<Page<User>, ApiError> {
        decode(self.http.get_json(COLLECTION, &filters.to_query(page))?)
    }

    pub fn update(&self, id: &str, draft: &UserDraft) -> Result<User, ApiError> {
        decode(self.http.put_json(&item_path(COLLECTION, id), &encode(draft)?)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&item_path(COLLECTION, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_filter_uses_wire_name() {
        let filters = UserFilters {
            role: Some(Role::CollegeAdmin),
            ..UserFilters::default()
        };
        let query = filters.to_query(1);
        assert!(query.contains(&("role", "collegeAdmin".to_string())));
    }
}
