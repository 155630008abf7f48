//! Settings store
//!
//! Holds the non-tally display configuration. A thin collaborator of the
//! core: the update handler broadcasts the change so viewers can re-render
//! the title without refetching the tally.

use parking_lot::RwLock;
use types::settings::EventSettings;

pub struct SettingsStore {
    inner: RwLock<EventSettings>,
}

impl SettingsStore {
    pub fn new(settings: EventSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    pub fn current(&self) -> EventSettings {
        self.inner.read().clone()
    }

    pub fn update(&self, settings: EventSettings) -> EventSettings {
        *self.inner.write() = settings.clone();
        settings
    }
}
