//! Synchronous dispatch of the "entry created" event.
//!
//! Listeners are called in the order they subscribed, on the caller's
//! thread. A listener cannot fail the event: it reports its own problems.

use common::model::entry::Entry;
use common::model::form::Form;
use std::sync::Arc;

pub trait EntryListener: Send + Sync {
    fn on_entry_created(&self, entry: &Entry, form: &Form);
}

/// Listeners of entries that have been validated and stored.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    listeners: Vec<Arc<dyn EntryListener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `listener`. Subscribing the same listener twice has no effect.
    pub fn subscribe(&mut self, listener: Arc<dyn EntryListener>) {
        if !self.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    pub fn entry_created(&self, entry: &Entry, form: &Form) {
        for listener in &self.listeners {
            listener.on_entry_created(entry, form);
        }
    }
}
