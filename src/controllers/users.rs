use crate::api::{UserFilters, UsersService};
use crate::controllers::store::Subscribers;
use crate::models::{User, UserDraft};

pub struct UsersController {
    service: UsersService,
    items: Vec<User>,
    is_loading: bool,
    last_error: Option<String>,
    page: u32,
    filters: UserFilters,
    subscribers: Subscribers,
}

impl UsersController {
    pub fn new(service: UsersService) -> Self {
        UsersController {
            service,
            items: Vec::new(),
            is_loading: false,
            last_error: None,
            page: 0,
            filters: UserFilters::default(),
            subscribers: Subscribers::new(),
        }
    }

    pub fn items(&self) -> &[User] {
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

    pub fn load(&mut self, filters: UserFilters) -> bool {
        self.is_loading = true;
        self.subscribers.notify();

        let ok = match self.service.list(&filters, 1) {
            Ok(page) => {
                self.items = page.items;
                self.page = 1;
                self.filters = filters;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading users failed: {}", err));
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

        let ok = match self.service.list(&self.filters, next) {
            Ok(page) => {
                self.items.extend(page.items);
                self.page = next;
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading more users failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    pub fn create(&mut self, draft: &UserDraft) -> Option<User> {
        let result = match self.service.create(draft) {
            Ok(user) => {
                self.items.push(user.clone());
                self.last_error = None;
                Some(user)
            }
            Err(err) => {
                log::warn!("user create failed: {}", err);
                self.last_error = Some(format!("creating user failed: {}", err));
                None
            }
        };
        self.subscribers.notify();
        result
    }

    pub fn update(&mut self, id: &str, draft: &UserDraft) -> Option<User> {
        let result = match self.service.update(id, draft) {
            Ok(updated) => {
                if let Some(entry) = self.items.iter_mut().find(|user| user.id == id) {
                    *entry = updated.clone();
                }
                self.last_error = None;
                Some(updated)
            }
            Err(err) => {
                log::warn!("user {} update failed: {}", id, err);
                self.last_error = Some(format!("updating user failed: {}", err));
                None
            }
        };
        self.subscribers.notify();
        result
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let ok = match self.service.delete(id) {
            Ok(()) => {
                self.items.retain(|user| user.id != id);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("user {} delete failed: {}", id, err);
                self.last_error = Some(format!("deleting user failed: {}", err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }
}
