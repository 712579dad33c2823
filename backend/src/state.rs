//! Shared application state, injected into the Actix app as `web::Data`.

use crate::entry_meta::OriginMetaProvider;
use crate::events::EventDispatcher;
use crate::host::{Host, LocalHost};
use crate::remote::RemoteConnector;
use crate::replication::ReplicationEngine;
use crate::store::SqliteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    /// "Entry created" listeners, the replication engine among them.
    pub events: Arc<EventDispatcher>,
    pub origin_meta: Arc<OriginMetaProvider>,
}

impl AppState {
    /// Wires the replication engine and the origin column to `store`.
    pub fn new(
        store: Arc<SqliteStore>,
        site_name: &str,
        connector: Arc<dyn RemoteConnector>,
    ) -> Self {
        let host: Arc<dyn Host> = Arc::new(LocalHost::new(site_name, store.clone()));
        let engine = ReplicationEngine::new(store.clone(), connector, host.clone());

        let mut events = EventDispatcher::new();
        events.subscribe(Arc::new(engine));

        AppState {
            origin_meta: Arc::new(OriginMetaProvider::new(store.clone(), host)),
            events: Arc::new(events),
            store,
        }
    }
}
