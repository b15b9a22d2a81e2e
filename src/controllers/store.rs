/// Explicit subscribe/notify contract standing in for framework
/// reactivity. Controllers fire it only after a mutating method has fully
/// resolved, so no subscriber observes a half-applied update.
pub(crate) struct Subscribers {
    listeners: Vec<Box<dyn Fn()>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Subscribers {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
