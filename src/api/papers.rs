use std::sync::Arc;

use crate::api::{decode, encode, item_path, UPLOAD_FIELD};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{FileRef, Page, PaperDraft, QuestionPaper};
use crate::upload::AttachmentUpload;

const COLLECTION: &str = "/question-papers";

#[derive(Debug, Clone, Default)]
pub struct PaperFilters {
    pub subject: Option<String>,
    pub year: Option<i64>,
    pub semester: Option<i64>,
    pub exam_type: Option<String>,
    pub college_id: Option<String>,
    pub search: Option<String>,
}

impl PaperFilters {
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
        if let Some(exam_type) = &self.exam_type {
            query.push(("examType", exam_type.clone()));
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

/// Backend seam for question papers, mirroring the books one.
pub trait PapersApi {
    fn create(&self, draft: &PaperDraft) -> Result<QuestionPaper, ApiError>;
    fn get(&self, id: &str) -> Result<QuestionPaper, ApiError>;
    fn list(&self, filters: &PaperFilters, page: u32) -> Result<Page<QuestionPaper>, ApiError>;
    fn update(&self, id: &str, draft: &PaperDraft) -> Result<QuestionPaper, ApiError>;
    fn delete(&self, id: &str) -> Result<(), ApiError>;
    fn upload_attachment(&self, id: &str, upload: AttachmentUpload) -> Result<FileRef, ApiError>;
}

pub struct PapersService {
    http: Arc<ApiClient>,
}

impl PapersService {
    pub fn new(http: Arc<ApiClient>) -> Self {
        PapersService { http }
    }
}

impl PapersApi for PapersService {
    fn create(&self, draft: &PaperDraft) -> Result<QuestionPaper, ApiError> {
        decode(self.http.post_json(COLLECTION, &encode(draft)?)?)
    }

    fn get(&self, id: &str) -> Result<QuestionPaper, ApiError> {
        decode(self.http.get_json(&item_path(COLLECTION, id), &[])?)
    }

    fn list(&self, filters: &PaperFilters, page: u32) -> Result<Page<QuestionPaper>, ApiError> {
        decode(self.http.get_json(COLLECTION, &filters.to_query(page))?)
    }

    fn update(&self, id: &str, draft: &PaperDraft) -> Result<QuestionPaper, ApiError> {
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
