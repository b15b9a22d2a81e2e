use crate::api::{BookFilters, BooksApi};
use crate::controllers::store::Subscribers;
use crate::models::{Book, BookDraft};
use crate::upload::{AttachmentResult, AttachmentUpload};

/// Owns the session-local book list. Every entry corresponds to a record
/// the backend has confirmed: entries are appended only after a create
/// succeeds and removed only after a delete succeeds, never speculatively.
pub struct BooksController<S: BooksApi> {
    api: S,
    items: Vec<Book>,
    is_loading: bool,
    last_error: Option<String>,
    page: u32,
    filters: BookFilters,
    subscribers: Subscribers,
}

impl<S: BooksApi> BooksController<S> {
    pub fn new(api: S) -> Self {
        BooksController {
            api,
            items: Vec::new(),
            is_loading: false,
            last_error: None,
            page: 0,
            filters: BookFilters::default(),
            subscribers: Subscribers::new(),
        }
    }

    pub fn items(&self) -> &[Book] {
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

    /// Replace the list with page 1 under the given filters.
    pub fn load(&mut self, filters: BookFilters) -> bool {
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
                self.last_error = Some(format!("loading books failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    /// Fetch the next page and append it. The page counter only advances
    /// on success, so a retry re-requests the same page.
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
                self.last_error = Some(format!("loading more books failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    pub fn create(&mut self, draft: &BookDraft) -> Option<Book> {
        self.create_with_attachments(draft, Vec::new())
            .map(|(book, _)| book)
    }

    /// Create the metadata record, then attach as many files as possible.
    ///
    /// The create call is the hard gate: if it fails, nothing happened and
    /// `None` comes back. Once it succeeds the record is appended to the
    /// list immediately and stays there no matter how the uploads go:
    /// a failed transfer must not throw away metadata the admin just
    /// typed; the upload can be retried on its own. Uploads run in the
    /// order supplied and fail independently of one another.
    pub fn create_with_attachments(
        &mut self,
        draft: &BookDraft,
        files: Vec<AttachmentUpload>,
    ) -> Option<(Book, Vec<AttachmentResult>)> {
        self.is_loading = true;
        self.last_error = None;
        self.subscribers.notify();

        let created = match self.api.create(draft) {
            Ok(book) => book,
            Err(err) => {
                log::warn!("book create failed: {}", err);
                self.last_error = Some(format!("creating book failed: {}", err));
                self.is_loading = false;
                self.subscribers.notify();
                return None;
            }
        };

        log::info!("book created id={}", created.id);
        self.items.push(created.clone());

        let mut results = Vec::with_capacity(files.len());
        for upload in files {
            let kind = upload.kind;
            let filename = upload.filename.clone();
            match self.api.upload_attachment(&created.id, upload) {
                Ok(file_ref) => {
                    if let Some(entry) = self.items.iter_mut().find(|book| book.id == created.id) {
                        entry.apply_file_ref(kind, &file_ref);
                    }
                    results.push(AttachmentResult {
                        kind,
                        filename,
                        outcome: Ok(()),
                    });
                }
                Err(err) => {
                    log::warn!("book {} {} upload failed: {}", created.id, kind.label(), err);
                    results.push(AttachmentResult {
                        kind,
                        filename,
                        outcome: Err(err.to_string()),
                    });
                }
            }
        }

        let failed: Vec<&str> = results
            .iter()
            .filter(|result| !result.succeeded())
            .map(|result| result.kind.label())
            .collect();
        if !failed.is_empty() {
            self.last_error = Some(format!(
                "book created, but upload failed for {}",
                failed.join(", ")
            ));
        }

        let record = self
            .items
            .iter()
            .find(|book| book.id == created.id)
            .cloned()
            .unwrap_or(created);

        self.is_loading = false;
        self.subscribers.notify();
        Some((record, results))
    }

    /// Retry an upload for a record that already exists, outside the
    /// create flow.
    pub fn upload_attachment(&mut self, id: &str, upload: AttachmentUpload) -> bool {
        let kind = upload.kind;
        let ok = match self.api.upload_attachment(id, upload) {
            Ok(file_ref) => {
                if let Some(entry) = self.items.iter_mut().find(|book| book.id == id) {
                    entry.apply_file_ref(kind, &file_ref);
                }
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("book {} {} upload failed: {}", id, kind.label(), err);
                self.last_error = Some(format!("{} upload failed: {}", kind.label(), err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }

    pub fn update(&mut self, id: &str, draft: &BookDraft) -> Option<Book> {
        let result = match self.api.update(id, draft) {
            Ok(updated) => {
                if let Some(entry) = self.items.iter_mut().find(|book| book.id == id) {
                    *entry = updated.clone();
                }
                self.last_error = None;
                Some(updated)
            }
            Err(err) => {
                log::warn!("book {} update failed: {}", id, err);
                self.last_error = Some(format!("updating book failed: {}", err));
                None
            }
        };
        self.subscribers.notify();
        result
    }

    /// Only a confirmed delete removes the local entry. Deleting an id we
    /// never tracked is fine; the backend call is still made and the
    /// local removal is a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let ok = match self.api.delete(id) {
            Ok(()) => {
                self.items.retain(|book| book.id != id);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("book {} delete failed: {}", id, err);
                self.last_error = Some(format!("deleting book failed: {}", err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }
}
