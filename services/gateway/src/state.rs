use crate::config::Config;
use crate::settings::SettingsStore;
use std::sync::Arc;
use types::settings::EventSettings;
use vote_ledger::{BroadcastHub, CompositeResolver, IdentityResolver, VoteLedger};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ledger: Arc<VoteLedger>,
    pub hub: Arc<BroadcastHub>,
    pub settings: Arc<SettingsStore>,
    pub resolver: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let hub = Arc::new(BroadcastHub::new());
        let ledger = Arc::new(VoteLedger::new(hub.clone()));
        let settings = Arc::new(SettingsStore::new(EventSettings {
            event_title: config.event_title.clone(),
        }));

        Self {
            config: Arc::new(config),
            ledger,
            hub,
            settings,
            resolver: Arc::new(CompositeResolver),
        }
    }
}
