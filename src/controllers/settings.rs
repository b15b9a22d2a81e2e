use crate::api::SettingsService;
use crate::controllers::store::Subscribers;
use crate::models::AppSettings;

pub struct SettingsController {
    service: SettingsService,
    settings: Option<AppSettings>,
    is_loading: bool,
    last_error: Option<String>,
    subscribers: Subscribers,
}

impl SettingsController {
    pub fn new(service: SettingsService) -> Self {
        SettingsController {
            service,
            settings: None,
            is_loading: false,
            last_error: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn settings(&self) -> Option<&AppSettings> {
        self.settings.as_ref()
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

    pub fn load(&mut self) -> bool {
        self.is_loading = true;
        self.subscribers.notify();

        let ok = match self.service.get() {
            Ok(settings) => {
                self.settings = Some(settings);
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(format!("loading settings failed: {}", err));
                false
            }
        };

        self.is_loading = false;
        self.subscribers.notify();
        ok
    }

    pub fn save(&mut self, settings: &AppSettings) -> bool {
        let ok = match self.service.update(settings) {
            Ok(saved) => {
                self.settings = Some(saved);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::warn!("settings update failed: {}", err);
                self.last_error = Some(format!("saving settings failed: {}", err));
                false
            }
        };
        self.subscribers.notify();
        ok
    }
}
