use crate::api::{PaperFilters, PapersApi};
use crate::controllers::store::Subscribers;
use crate::models::{PaperDraft, QuestionPaper};
use crate::upload::{AttachmentResult, AttachmentUpload};

/// Session-local question-paper list. Same ownership rules as the books
/// controller: only confirmed creates append, only confirmed deletes
/// remove.
pub struct PapersController<S: PapersApi> {
    api: S,
    items: Vec<QuestionPaper>,
    is_loading: bool,
    last_error: Option<String>,
    page: u32,
    filters: PaperFilters,
    subscribers: Subscribers,
}

impl<S: PapersApi> PapersController<S> {
    pub fn new(api: S) -> Self {
        PapersController {
            api,
            items: Vec::new(),
            is_loading: false,
            last_error: None,
            page: 0,
            filters: PaperFilters::default(),
            subscribers: Subscribers::new(),
        }
    }

    pub fn items(&self) -> &[QuestionPaper] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.subscribers.subscribe(listener);
    }

    pub fn load(&mut self, filters: PaperFilters) -> bool {
        self.is_loading = true;
        self.subscribers.notify();

        let ok = match self.api.list(&filters, 1) {
            Ok(page) => {
                self.items = page.items;
                self.page = 1;
                self.filters = filters;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading question papers failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    pub fn load_more(&mut self) -> bool {
        let next = self.page + 1;
        self.is_loading = true;
        self.subscribers.notify();

        let ok = match self.api.list(&self.filters, next) {
            Ok(page) => {
                self.items.extend(page.items);
                self.page = next;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading more question papers failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    pub fn create(&mut self, draft: &PaperDraft) -> Option<QuestionPaper> {
        self.create_with_attachments(draft, Vec::new())
            .map(|(paper, _)| paper)
    }

    /// Same two-phase contract as book creation: the create call gates
    /// everything, uploads are attempted independently afterwards, and
    /// the record is never rolled back because a transfer failed.
    pub fn create_with_attachments(
        &mut self,
        draft: &PaperDraft,
        files: Vec<AttachmentUpload>,
    ) -> Option<(QuestionPaper, Vec<AttachmentResult>)> {
        self.is_loading = true;
        self.last_error = None;
        self.subscribers.notify();

        let created = match self.api.create(draft) {
            Ok(paper) => paper,
            Err(err) => {
                log::warn!("question paper create failed: {}", err);
                self.last_error = Some(format!("creating question paper failed: {}", err));
                self.is_loading = false;
                self.subscribers.notify();
                return None;
            }
        };

        log::info!("question paper created id={}", created.id);
        self.items.push(created.clone());

        let mut results = Vec::with_capacity(files.len());
        let mut failed_labels = Vec::new();
        for upload in files {
            let kind = upload.kind;
            let filename = upload.filename.clone();
            match self.api.upload_attachment(&created.id, upload) {
                Ok(file_ref) => {
                    if let Some(entry) =
                        self.items.iter_mut().find(|paper| paper.id == created.id)
                    {
                        entry.apply_file_ref(kind, &file_ref);
                    }
                    results.push(AttachmentResult {
                        kind,
                        filename,
                        outcome: Ok(()),
                    });
                }
                Err(err) => {
                    log::warn!(
                        "question paper {} {} upload failed: {}",
                        created.id,
                        kind.label(),
                        err
                    );
                    failed_labels.push(kind.label());
                    results.push(AttachmentResult {
                        kind,
                        filename,
                        outcome: Err(err.to_string()),
                    });
                }
            }
        }

        if !failed_labels.is_empty() {
            self.last_error = Some(format!(
                "question paper created, but upload failed for {}",
                failed_labels.join(", ")
            ));
        }

        let record = self
            .items
            .iter()
            .find(|paper| paper.id == created.id)
            .cloned()
            .unwrap_or(created);

        self.is_loading = false;
        self.subscribers.notify();
        Some((record, results))
    }

    pub fn upload_attachment(&mut self, id: &str, upload: AttachmentUpload) -> bool {
        let kind = upload.kind;
        let ok = match self.api.upload_attachment(id, upload) {
            Ok(file_ref) => {
                if let Some(entry) = self.items.iter_mut().find(|paper| paper.id == id) {
                    entry.apply_file_ref(kind, &file_ref);
                }
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("question paper {} {} upload failed: {}", id, kind.label(), err);
                self.last_error = Some(format!("{} upload failed: {}", kind.label(), err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }

    pub fn update(&mut self, id: &str, draft: &PaperDraft) -> Option<QuestionPaper> {
        let result = match self.api.update(id, draft) {
            Ok(updated) => {
                if let Some(entry) = self.items.iter_mut().find(|paper| paper.id == id) {
                    *entry = updated.clone();
                }
                self.last_error = None;
                Some(updated)
            }
            Err(err) => {
                log::warn!("question paper {} update failed: {}", id, err);
                self.last_error = Some(format!("updating question paper failed: {}", err));
                None
            }
        };
        self.subscribers.notify();
        result
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let ok = match self.api.delete(id) {
            Ok(()) => {
                self.items.retain(|paper| paper.id != id);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("question paper {} delete failed: {}", id, err);
                self.last_error = Some(format!("deleting question paper failed: {}", err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{FileRef, Page};
    use crate::upload::{AttachmentKind, UploadSource};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakePapersApi {
        fail_delete_ids: Vec<String>,
        fail_uploads: bool,
        next_id: Cell<u32>,
        upload_calls: RefCell<Vec<(String, String)>>,
    }

    impl PapersApi for FakePapersApi {
        fn create(&self, draft: &PaperDraft) -> Result<QuestionPaper, ApiError> {
            let next = self.next_id.get() + 1;
            self.next_id.set(next);
            Ok(QuestionPaper {
                id: format!("p{}", next),
                title: draft.title.clone(),
                subject: draft.subject.clone(),
                year: draft.year,
                semester: draft.semester,
                exam_type: draft.exam_type.clone(),
                marks: draft.marks,
                college_id: draft.college_id.clone(),
                pdf_url: None,
                pdf_name: None,
            })
        }

        fn get(&self, _id: &str) -> Result<QuestionPaper, ApiError> {
            Err(ApiError::Status {
                status: 404,
                message: "not found".to_string(),
            })
        }

        fn list(&self, _filters: &PaperFilters, page: u32) -> Result<Page<QuestionPaper>, ApiError> {
            Ok(Page {
                items: Vec::new(),
                page,
                total: 0,
            })
        }

        fn update(&self, _id: &str, _draft: &PaperDraft) -> Result<QuestionPaper, ApiError> {
            Err(ApiError::Status {
                status: 404,
                message: "not found".to_string(),
            })
        }

        fn delete(&self, id: &str) -> Result<(), ApiError> {
            if self.fail_delete_ids.iter().any(|failing| failing == id) {
                return Err(ApiError::Status {
                    status: 500,
                    message: "backend unavailable".to_string(),
                });
            }
            Ok(())
        }

        fn upload_attachment(
            &self,
            id: &str,
            upload: AttachmentUpload,
        ) -> Result<FileRef, ApiError> {
            self.upload_calls
                .borrow_mut()
                .push((id.to_string(), upload.filename.clone()));
            if self.fail_uploads {
                return Err(ApiError::Timeout);
            }
            Ok(FileRef {
                url: format!("https://cdn.example/papers/{}", id),
                filename: upload.filename,
            })
        }
    }

    fn draft(title: &str) -> PaperDraft {
        PaperDraft {
            title: title.to_string(),
            subject: "Math".to_string(),
            year: 2,
            semester: 4,
            exam_type: None,
            marks: None,
            college_id: None,
        }
    }

    #[test]
    fn paper_without_pdf_is_created_with_zero_upload_calls() {
        let mut controller = PapersController::new(FakePapersApi::default());
        let paper = controller
            .create(&draft("Midterm 2024"))
            .expect("create should succeed");

        assert_eq!(paper.title, "Midterm 2024");
        assert_eq!(controller.items().len(), 1);
        assert!(controller.api.upload_calls.borrow().is_empty());
        assert!(paper.pdf_url.is_none());
    }

    #[test]
    fn five_creates_then_two_deletes_preserve_order() {
        let mut controller = PapersController::new(FakePapersApi::default());
        for index in 1..=5 {
            controller
                .create(&draft(&format!("Paper {}", index)))
                .expect("create should succeed");
        }
        let ids: Vec<String> = controller.items().iter().map(|p| p.id.clone()).collect();

        assert!(controller.delete(&ids[1]));
        assert!(controller.delete(&ids[3]));

        let titles: Vec<&str> = controller
            .items()
            .iter()
            .map(|paper| paper.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Paper 1", "Paper 3", "Paper 5"]);
    }

    #[test]
    fn failed_delete_keeps_ids_and_order_identical() {
        let api = FakePapersApi {
            fail_delete_ids: vec!["p2".to_string()],
            ..FakePapersApi::default()
        };
        let mut controller = PapersController::new(api);
        for index in 1..=3 {
            controller
                .create(&draft(&format!("Paper {}", index)))
                .expect("create should succeed");
        }
        let before: Vec<String> = controller.items().iter().map(|p| p.id.clone()).collect();

        assert!(!controller.delete("p2"));

        let after: Vec<String> = controller.items().iter().map(|p| p.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn timed_out_upload_leaves_paper_listed_without_pdf() {
        let api = FakePapersApi {
            fail_uploads: true,
            ..FakePapersApi::default()
        };
        let mut controller = PapersController::new(api);
        let (paper, results) = controller
            .create_with_attachments(
                &draft("Final 2023"),
                vec![AttachmentUpload {
                    kind: AttachmentKind::Pdf,
                    source: UploadSource::Bytes(vec![0u8; 2048]),
                    filename: "final-2023.pdf".to_string(),
                }],
            )
            .expect("create should survive the upload timeout");

        assert_eq!(controller.items().len(), 1);
        assert!(paper.pdf_url.is_none());
        assert_eq!(results.len(), 1);
        assert!(!results[0].succeeded());
        assert_eq!(controller.api.upload_calls.borrow().len(), 1);
    }

    #[test]
    fn retry_upload_fills_the_pdf_slot() {
        let mut controller = PapersController::new(FakePapersApi::default());
        let paper = controller.create(&draft("Retryable")).expect("create");

        let ok = controller.upload_attachment(
            &paper.id,
            AttachmentUpload::from_bytes(AttachmentKind::Pdf, vec![0u8; 16], "retry.pdf"),
        );

        assert!(ok);
        assert_eq!(controller.items()[0].pdf_name.as_deref(), Some("retry.pdf"));
    }
}
