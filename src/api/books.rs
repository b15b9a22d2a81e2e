use std::sync::Arc;

use crate::api::{decode, encode, item_path, UPLOAD_FIELD};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{Book, BookDraft, FileRef, Page};
use crate::upload::AttachmentUpload;

const COLLECTION: &str = "/books";

/// List filters, forwarded verbatim as query parameters.
#[derive(Debug, Clone, Default)]
pub struct BookFilters {
    pub subject: Option<String>,
    pub year: Option<i64>,
    pub semester: Option<i64>,
    pub college_id: Option<String>,
    pub search: Option<String>,
}

impl BookFilters {
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", page.to_string())];
        if let Some(subject) = &self.subject {
            query.push(("subject", subject.clone()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(semester) = self.semester {
            query.push(("semester", semester.to_string()));
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

/// What the books controller needs from the backend. The HTTP-backed
/// service implements it; tests substitute a fake.
pub trait BooksApi {
    fn create(&self, draft: &BookDraft) -> Result<Book, ApiError>;
    fn get(&self, id: &str) -> Result<Book, ApiError>;
    fn list(&self, filters: &BookFilters, page: u32) -> Result<Page<Book>, ApiError>;
    fn update(&self, id: &str, draft: &BookDraft) -> Result<Book, ApiError>;
    fn delete(&self, id: &str) -> Result<(), ApiError>;
    fn upload_attachment(&self, id: &str, upload: AttachmentUpload) -> Result<FileRef, ApiError>;
}

pub struct BooksService {
    http: Arc<ApiClient>,
}

impl BooksService {
    pub fn new(http: Arc<ApiClient>) -> Self {
        BooksService { http }
    }
}

impl BooksApi for BooksService {
    fn create(&self, draft: &BookDraft) -> Result<Book, ApiError> {
        decode(self.http.post_json(COLLECTION, &encode(draft)?)?)
    }

    fn get(&self, id: &str) -> Result<Book, ApiError> {
        decode(self.http.get_json(&item_path(COLLECTION, id), &[])?)
    }

    fn list(&self, filters: &BookFilters, page: u32) -> Result<Page<Book>, ApiError> {
        decode(self.http.get_json(COLLECTION, &filters.to_query(page))?)
    }

    fn update(&self, id: &str, draft: &BookDraft) -> Result<Book, ApiError> {
        decode(self.http.put_json(&item_path(COLLECTION, id), &encode(draft)?)?)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.http.delete(&item_path(COLLECTION, id))
    }

    fn upload_attachment(&self, id: &str, upload: AttachmentUpload) -> Result<FileRef, ApiError> {
        let path = format!(
            "{}/{}",
            item_path(COLLECTION, id),
            upload.kind.endpoint_suffix()
        );
        decode(
            self.http
                .upload_multipart(&path, UPLOAD_FIELD, upload.source, &upload.filename)?,
        )
    }
}
