//! The "Site ID" entry column.
//!
//! Entries remember the identifier they were created with. Entries stored
//! without one (created before the column existed, or received with a blank
//! value) show the identifier this site would use right now.

use crate::error::StoreError;
use crate::host::Host;
use crate::store::ConfigurationStore;
use common::model::entry::Entry;
use common::model::entry_meta::{EntryMetaDefinition, FilterOperator, MetaFilter, ORIGIN_META_KEY};
use common::model::settings::effective_identifier;
use std::sync::Arc;

pub struct OriginMetaProvider {
    store: Arc<dyn ConfigurationStore>,
    host: Arc<dyn Host>,
}

impl OriginMetaProvider {
    pub fn new(store: Arc<dyn ConfigurationStore>, host: Arc<dyn Host>) -> Self {
        OriginMetaProvider { store, host }
    }

    pub fn definition(&self) -> EntryMetaDefinition {
        EntryMetaDefinition {
            key: ORIGIN_META_KEY.to_string(),
            label: "Site ID".to_string(),
            is_numeric: false,
            is_default_column: true,
            filter: MetaFilter {
                operators: vec![
                    FilterOperator::Is,
                    FilterOperator::IsNot,
                    FilterOperator::Contains,
                ],
            },
        }
    }

    /// The identifier this site stamps on entries at the moment.
    pub fn current_identifier(&self) -> Result<String, StoreError> {
        let site = self.store.site_settings()?;
        Ok(effective_identifier(site.as_ref(), &self.host.display_name()))
    }

    pub fn resolve(&self, entry: &Entry) -> Result<String, StoreError> {
        match entry.stored_origin() {
            Some(origin) => Ok(origin.to_string()),
            None => self.current_identifier(),
        }
    }

    /// Fills in the column for every entry and keeps those matching the
    /// filter, if one is given.
    pub fn resolve_and_filter(
        &self,
        entries: Vec<Entry>,
        filter: Option<(FilterOperator, &str)>,
    ) -> Result<Vec<Entry>, StoreError> {
        let mut resolved = Vec::with_capacity(entries.len());
        for mut entry in entries {
            let origin = self.resolve(&entry)?;
            let keep = filter.map_or(true, |(operator, needle)| operator.matches(&origin, needle));
            if keep {
                entry.origin = Some(origin);
                resolved.push(entry);
            }
        }

        Ok(resolved)
    }
}
