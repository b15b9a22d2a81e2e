use crate::api::CollegesService;
use crate::controllers::store::Subscribers;
use crate::models::{College, CollegeDraft};

pub struct CollegesController {
    service: CollegesService,
    items: Vec<College>,
    is_loading: bool,
    last_error: Option<String>,
    page: u32,
    search: Option<String>,
    subscribers: Subscribers,
}

impl CollegesController {
    pub fn new(service: CollegesService) -> Self {
        CollegesController {
            service,
            items: Vec::new(),
            is_loading: false,
            last_error: None,
            page: 0,
            search: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn items(&self) -> &[College] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.subscribers.subscribe(listener);
    }

    pub fn load(&mut self, search: Option<String>) -> bool {
        self.is_loading = true;
        self.subscribers.notify();

        let ok = match self.service.list(search.as_deref(), 1) {
            Ok(page) => {
                self.items = page.items;
                self.page = 1;
                self.search = search;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading colleges failed: {}", err));
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

        let ok = match self.service.list(self.search.as_deref(), next) {
            Ok(page) => {
                self.items.extend(page.items);
                self.page = next;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading more colleges failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    pub fn create(&mut self, draft: &CollegeDraft) -> Option<College> {
        let result = match self.service.create(draft) {
            Ok(college) => {
                self.items.push(college.clone());
                self.last_error = None;
                Some(college)
            }
            Err(err) => {
                log::warn!("college create failed: {}", err);
                self.last_error = Some(format!("creating college failed: {}", err));
                None
            }
        };
        self.subscribers.notify();
        result
    }

    pub fn update(&mut self, id: &str, draft: &CollegeDraft) -> Option<College> {
        let result = match self.service.update(id, draft) {
            Ok(updated) => {
                if let Some(entry) = self.items.iter_mut().find(|college| college.id == id) {
                    *entry = updated.clone();
                }
                self.last_error = None;
                Some(updated)
            }
            Err(err) => {
                log::warn!("college {} update failed: {}", id, err);
                self.last_error = Some(format!("updating college failed: {}", err));
                None
            }
        };
        self.subscribers.notify();
        result
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let ok = match self.service.delete(id) {
            Ok(()) => {
                self.items.retain(|college| college.id != id);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("college {} delete failed: {}", id, err);
                self.last_error = Some(format!("deleting college failed: {}", err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }
}
