//! Hooks the replication engine needs from the installation it runs in.

use crate::error::HostError;
use crate::store::SqliteStore;
use std::sync::Arc;

pub trait Host: Send + Sync {
    /// Human readable installation name, used when no site identifier is set.
    fn display_name(&self) -> String;

    /// Removes a local entry once it has been forwarded.
    fn delete_entry(&self, entry_id: i64) -> Result<(), HostError>;
}

/// Host backed by this installation's own database.
pub struct LocalHost {
    display_name: String,
    store: Arc<SqliteStore>,
}

impl LocalHost {
    pub fn new(display_name: &str, store: Arc<SqliteStore>) -> Self {
        LocalHost {
            display_name: display_name.to_string(),
            store,
        }
    }
}

impl Host for LocalHost {
    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn delete_entry(&self, entry_id: i64) -> Result<(), HostError> {
        if self.store.delete_entry(entry_id)? {
            Ok(())
        } else {
            Err(HostError::EntryNotFound(entry_id))
        }
    }
}
