//! # Entry Replication
//!
//! Forwards entries submitted on this site to the central site.
//!
//! ## Workflow
//!
//! 1.  **Site settings**: without a remote URL and both API keys the site is a
//!     receiver only and nothing happens.
//! 2.  **Form settings**: only forms with replication enabled are forwarded.
//! 3.  **Form mapping**: the first forwarded entry of a form creates the form
//!     on the central site. The remote id is stored through
//!     `claim_remote_form_id`, so a form that is already mapped keeps its id
//!     even when two submissions race to create it.
//! 4.  **Forwarding**: a copy of the entry is sent with the remote form id and
//!     this site's identifier. The local entry itself is left untouched.
//! 5.  **Retention**: when the form is set to delete entries, the local entry
//!     is removed after the remote site accepted the copy.
//!
//! A failed form creation stops the replication before anything is sent, and
//! a failed forward keeps the local entry. Nothing is retried.

use crate::error::{RemoteError, ReplicationError};
use crate::events::EntryListener;
use crate::host::Host;
use crate::remote::{RemoteApi, RemoteConnector};
use crate::store::ConfigurationStore;
use common::model::entry::Entry;
use common::model::form::Form;
use common::model::settings::{effective_identifier, SiteSettings};
use log::{debug, error, info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Site settings are missing the remote URL or a key.
    ReceiverOnly,
    /// The form has no settings or replication is switched off for it.
    FormNotEnabled,
}

/// What happened to the local entry after a successful forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retention {
    Kept,
    Deleted,
    DeletionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationOutcome {
    Skipped(SkipReason),
    Forwarded {
        remote_form_id: String,
        retention: Retention,
    },
}

pub struct ReplicationEngine {
    store: Arc<dyn ConfigurationStore>,
    connector: Arc<dyn RemoteConnector>,
    host: Arc<dyn Host>,
}

impl ReplicationEngine {
    pub fn new(
        store: Arc<dyn ConfigurationStore>,
        connector: Arc<dyn RemoteConnector>,
        host: Arc<dyn Host>,
    ) -> Self {
        ReplicationEngine {
            store,
            connector,
            host,
        }
    }

    /// Forwards a freshly stored entry of `form` to the central site.
    pub fn replicate(
        &self,
        entry: &Entry,
        form: &Form,
    ) -> Result<ReplicationOutcome, ReplicationError> {
        let site = self.store.site_settings()?;
        let Some(endpoint) = site.as_ref().and_then(SiteSettings::remote_endpoint) else {
            return Ok(ReplicationOutcome::Skipped(SkipReason::ReceiverOnly));
        };
        let identifier = effective_identifier(site.as_ref(), &self.host.display_name());

        let form_id = form
            .id
            .ok_or_else(|| ReplicationError::UnsavedForm(form.title.clone()))?;
        let settings = match self.store.form_settings(form_id)? {
            Some(settings) if settings.enabled => settings,
            _ => return Ok(ReplicationOutcome::Skipped(SkipReason::FormNotEnabled)),
        };

        let remote = self.connector.connect(&endpoint);
        let remote_form_id = match settings.remote_form_id() {
            Some(id) => id.to_string(),
            None => self.create_remote_form(remote.as_ref(), form_id, form)?,
        };

        let mut outbound = entry.clone();
        outbound.form_id = remote_form_id.clone();
        outbound.origin = Some(identifier);

        remote
            .create_entry(&outbound)
            .map_err(|source| ReplicationError::RemoteEntryForwardFailed {
                entry_id: entry.id,
                source,
            })?;

        let retention = if settings.delete_after_forward {
            match self.host.delete_entry(entry.id) {
                Ok(()) => Retention::Deleted,
                Err(e) => Retention::DeletionFailed(e.to_string()),
            }
        } else {
            Retention::Kept
        };

        Ok(ReplicationOutcome::Forwarded {
            remote_form_id,
            retention,
        })
    }

    fn create_remote_form(
        &self,
        remote: &dyn RemoteApi,
        form_id: i64,
        form: &Form,
    ) -> Result<String, ReplicationError> {
        let created = remote
            .create_form(form)
            .map_err(|source| ReplicationError::RemoteFormCreationFailed { form_id, source })?;
        let created = created.trim();
        if created.is_empty() {
            return Err(ReplicationError::RemoteFormCreationFailed {
                form_id,
                source: RemoteError::InvalidResponse("empty form id".to_string()),
            });
        }

        let mapped = self.store.claim_remote_form_id(form_id, created)?;
        if mapped == created {
            info!("Form {} mapped to remote form {}", form_id, mapped);
        } else {
            warn!(
                "Form {} was mapped to remote form {} meanwhile; remote form {} is unused",
                form_id, mapped, created
            );
        }
        Ok(mapped)
    }
}

impl EntryListener for ReplicationEngine {
    fn on_entry_created(&self, entry: &Entry, form: &Form) {
        match self.replicate(entry, form) {
            Ok(ReplicationOutcome::Skipped(reason)) => {
                debug!("Entry {} not forwarded: {:?}", entry.id, reason);
            }
            Ok(ReplicationOutcome::Forwarded {
                remote_form_id,
                retention,
            }) => {
                info!(
                    "Entry {} forwarded to remote form {} ({:?})",
                    entry.id, remote_form_id, retention
                );
                if let Retention::DeletionFailed(reason) = retention {
                    warn!(
                        "Entry {} was forwarded but could not be deleted: {}",
                        entry.id, reason
                    );
                }
            }
            Err(e) => error!("Replication of entry {} failed: {}", entry.id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::store::SqliteStore;
    use common::model::form::Field;
    use common::model::settings::{FormSettings, RemoteEndpoint};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct RemoteLog {
        connects: usize,
        forms: Vec<Form>,
        entries: Vec<Entry>,
    }

    /// Remote site double. `before_create_form` runs inside `create_form`,
    /// standing in for another worker acting at the same time.
    struct FakeRemote {
        log: Arc<Mutex<RemoteLog>>,
        form_id: String,
        fail_forms: bool,
        fail_entries: bool,
        before_create_form: Option<Box<dyn Fn() + Send + Sync>>,
    }

    impl FakeRemote {
        fn returning(form_id: &str) -> Self {
            FakeRemote {
                log: Arc::new(Mutex::new(RemoteLog::default())),
                form_id: form_id.to_string(),
                fail_forms: false,
                fail_entries: false,
                before_create_form: None,
            }
        }
    }

    struct Connection(Arc<FakeRemote>);

    impl RemoteApi for Connection {
        fn create_form(&self, form: &Form) -> Result<String, RemoteError> {
            if let Some(hook) = &self.0.before_create_form {
                hook();
            }
            if self.0.fail_forms {
                return Err(RemoteError::Transport("connection refused".to_string()));
            }
            self.0.log.lock().forms.push(form.clone());
            Ok(self.0.form_id.clone())
        }

        fn create_entry(&self, entry: &Entry) -> Result<(), RemoteError> {
            if self.0.fail_entries {
                return Err(RemoteError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            self.0.log.lock().entries.push(entry.clone());
            Ok(())
        }
    }

    impl RemoteConnector for Arc<FakeRemote> {
        fn connect(&self, _endpoint: &RemoteEndpoint) -> Box<dyn RemoteApi> {
            self.log.lock().connects += 1;
            Box::new(Connection(self.clone()))
        }
    }

    struct FakeHost {
        deleted: Mutex<Vec<i64>>,
        fail_delete: bool,
    }

    impl FakeHost {
        fn new() -> Self {
            FakeHost {
                deleted: Mutex::new(Vec::new()),
                fail_delete: false,
            }
        }
    }

    impl Host for FakeHost {
        fn display_name(&self) -> String {
            "Site A".to_string()
        }

        fn delete_entry(&self, entry_id: i64) -> Result<(), HostError> {
            if self.fail_delete {
                return Err(HostError::EntryNotFound(entry_id));
            }
            self.deleted.lock().push(entry_id);
            Ok(())
        }
    }

    struct Fixture {
        store: Arc<SqliteStore>,
        remote: Arc<FakeRemote>,
        host: Arc<FakeHost>,
        form: Form,
        entry: Entry,
    }

    impl Fixture {
        fn new(remote: FakeRemote, host: FakeHost) -> Self {
            let store = Arc::new(SqliteStore::open_in_memory().unwrap());
            let form = store
                .insert_form(&Form::new("Contact", vec![Field::new(1, "Name", true)]))
                .unwrap();
            let mut values = BTreeMap::new();
            values.insert("1".to_string(), json!("Ada"));
            let entry = store.insert_entry(form.id.unwrap(), None, &values).unwrap();

            Fixture {
                store,
                remote: Arc::new(remote),
                host: Arc::new(host),
                form,
                entry,
            }
        }

        fn form_id(&self) -> i64 {
            self.form.id.unwrap()
        }

        fn configure_site(&self, identifier: &str) {
            self.store
                .save_site_settings(&SiteSettings {
                    remote_base_url: "https://central.example.com/gravityformsapi".to_string(),
                    public_key: "pub".to_string(),
                    private_key: "secret".to_string(),
                    local_identifier: identifier.to_string(),
                    results_enabled: false,
                })
                .unwrap();
        }

        fn configure_form(&self, enabled: bool, remote_form_id: &str, delete: bool) {
            self.store
                .save_form_settings(
                    self.form_id(),
                    &FormSettings {
                        enabled,
                        remote_form_id: remote_form_id.to_string(),
                        delete_after_forward: delete,
                    },
                )
                .unwrap();
        }

        fn engine(&self) -> ReplicationEngine {
            ReplicationEngine::new(
                self.store.clone(),
                Arc::new(self.remote.clone()),
                self.host.clone(),
            )
        }

        fn run(&self) -> Result<ReplicationOutcome, ReplicationError> {
            self.engine().replicate(&self.entry, &self.form)
        }

        fn mapping(&self) -> String {
            self.store
                .form_settings(self.form_id())
                .unwrap()
                .unwrap()
                .remote_form_id
        }
    }

    #[test]
    fn incomplete_site_settings_do_nothing() {
        let incomplete = [
            ("", "pub", "secret"),
            ("https://central.example.com", "", "secret"),
            ("https://central.example.com", "pub", ""),
        ];
        for (url, public_key, private_key) in incomplete {
            let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
            fx.store
                .save_site_settings(&SiteSettings {
                    remote_base_url: url.to_string(),
                    public_key: public_key.to_string(),
                    private_key: private_key.to_string(),
                    ..Default::default()
                })
                .unwrap();
            fx.configure_form(true, "", true);

            assert_eq!(
                fx.run().unwrap(),
                ReplicationOutcome::Skipped(SkipReason::ReceiverOnly)
            );
            assert_eq!(fx.remote.log.lock().connects, 0);
            assert_eq!(fx.mapping(), "");
            assert!(fx.host.deleted.lock().is_empty());
        }
    }

    #[test]
    fn missing_site_settings_do_nothing() {
        let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
        fx.configure_form(true, "", false);

        assert_eq!(
            fx.run().unwrap(),
            ReplicationOutcome::Skipped(SkipReason::ReceiverOnly)
        );
        assert_eq!(fx.remote.log.lock().connects, 0);
    }

    #[test]
    fn disabled_or_unconfigured_forms_are_skipped() {
        let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
        fx.configure_site("");
        assert_eq!(
            fx.run().unwrap(),
            ReplicationOutcome::Skipped(SkipReason::FormNotEnabled)
        );

        fx.configure_form(false, "", true);
        assert_eq!(
            fx.run().unwrap(),
            ReplicationOutcome::Skipped(SkipReason::FormNotEnabled)
        );
        assert_eq!(fx.remote.log.lock().connects, 0);
    }

    #[test]
    fn first_entry_creates_and_maps_the_remote_form() {
        let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
        fx.configure_site("Region 1");
        fx.configure_form(true, "", false);

        let outcome = fx.run().unwrap();
        assert_eq!(
            outcome,
            ReplicationOutcome::Forwarded {
                remote_form_id: "77".to_string(),
                retention: Retention::Kept,
            }
        );
        assert_eq!(fx.mapping(), "77");

        let log = fx.remote.log.lock();
        assert_eq!(log.forms.len(), 1);
        assert_eq!(log.forms[0].title, "Contact");
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].form_id, "77");
        assert_eq!(log.entries[0].id, fx.entry.id);
        assert_eq!(log.entries[0].values, fx.entry.values);
    }

    #[test]
    fn mapped_forms_are_never_created_again() {
        let fx = Fixture::new(FakeRemote::returning("99"), FakeHost::new());
        fx.configure_site("");
        fx.configure_form(true, "R1", false);

        for _ in 0..3 {
            fx.run().unwrap();
        }

        let log = fx.remote.log.lock();
        assert!(log.forms.is_empty());
        assert_eq!(log.entries.len(), 3);
        assert!(log.entries.iter().all(|e| e.form_id == "R1"));
        drop(log);
        assert_eq!(fx.mapping(), "R1");
    }

    #[test]
    fn outbound_entry_carries_the_identifier_not_the_local_form() {
        let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
        fx.configure_site("Spain / Region 1");
        fx.configure_form(true, "", false);

        fx.run().unwrap();
        let log = fx.remote.log.lock();
        assert_eq!(log.entries[0].origin.as_deref(), Some("Spain / Region 1"));
        assert_ne!(log.entries[0].form_id, fx.form_id().to_string());
        assert_eq!(fx.entry.form_id, fx.form_id().to_string());
    }

    #[test]
    fn forwarded_entries_are_deleted_when_configured() {
        let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
        fx.configure_site("");
        fx.configure_form(true, "R1", true);

        let outcome = fx.run().unwrap();
        assert_eq!(
            outcome,
            ReplicationOutcome::Forwarded {
                remote_form_id: "R1".to_string(),
                retention: Retention::Deleted,
            }
        );
        assert_eq!(*fx.host.deleted.lock(), vec![fx.entry.id]);
    }

    #[test]
    fn failed_forward_keeps_the_local_entry() {
        let mut remote = FakeRemote::returning("77");
        remote.fail_entries = true;
        let fx = Fixture::new(remote, FakeHost::new());
        fx.configure_site("");
        fx.configure_form(true, "R1", true);

        let result = fx.run();
        assert!(matches!(
            result,
            Err(ReplicationError::RemoteEntryForwardFailed { entry_id, .. })
                if entry_id == fx.entry.id
        ));
        assert!(fx.host.deleted.lock().is_empty());
    }

    #[test]
    fn failed_form_creation_aborts_before_forwarding() {
        let mut remote = FakeRemote::returning("77");
        remote.fail_forms = true;
        let fx = Fixture::new(remote, FakeHost::new());
        fx.configure_site("");
        fx.configure_form(true, "", true);

        let result = fx.run();
        assert!(matches!(
            result,
            Err(ReplicationError::RemoteFormCreationFailed { .. })
        ));
        assert!(fx.remote.log.lock().entries.is_empty());
        assert_eq!(fx.mapping(), "");
        assert!(fx.host.deleted.lock().is_empty());
    }

    #[test]
    fn empty_remote_form_id_is_a_creation_failure() {
        let fx = Fixture::new(FakeRemote::returning("  "), FakeHost::new());
        fx.configure_site("");
        fx.configure_form(true, "", false);

        assert!(matches!(
            fx.run(),
            Err(ReplicationError::RemoteFormCreationFailed { .. })
        ));
        assert!(fx.remote.log.lock().entries.is_empty());
        assert_eq!(fx.mapping(), "");
    }

    #[test]
    fn concurrent_mapping_wins_over_a_late_creation() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let form = store.insert_form(&Form::new("Contact", vec![])).unwrap();
        let form_id = form.id.unwrap();

        let mut remote = FakeRemote::returning("78");
        let racing_store = store.clone();
        remote.before_create_form = Some(Box::new(move || {
            racing_store.claim_remote_form_id(form_id, "77").unwrap();
        }));

        let fx = Fixture {
            entry: store.insert_entry(form_id, None, &BTreeMap::new()).unwrap(),
            store,
            remote: Arc::new(remote),
            host: Arc::new(FakeHost::new()),
            form,
        };
        fx.configure_site("");
        fx.configure_form(true, "", false);

        let outcome = fx.run().unwrap();
        assert_eq!(
            outcome,
            ReplicationOutcome::Forwarded {
                remote_form_id: "77".to_string(),
                retention: Retention::Kept,
            }
        );
        assert_eq!(fx.mapping(), "77");
        assert_eq!(fx.remote.log.lock().entries[0].form_id, "77");
    }

    #[test]
    fn deletion_failure_is_reported_after_forwarding() {
        let mut host = FakeHost::new();
        host.fail_delete = true;
        let fx = Fixture::new(FakeRemote::returning("77"), host);
        fx.configure_site("");
        fx.configure_form(true, "R1", true);

        match fx.run().unwrap() {
            ReplicationOutcome::Forwarded {
                retention: Retention::DeletionFailed(_),
                ..
            } => {}
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(fx.remote.log.lock().entries.len(), 1);
    }

    #[test]
    fn unconfigured_site_forwards_with_display_name_and_cleans_up() {
        let fx = Fixture::new(FakeRemote::returning("77"), FakeHost::new());
        fx.configure_site("");
        fx.configure_form(true, "", true);

        fx.engine().on_entry_created(&fx.entry, &fx.form);

        assert_eq!(fx.mapping(), "77");
        let log = fx.remote.log.lock();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].form_id, "77");
        assert_eq!(log.entries[0].origin.as_deref(), Some("Site A"));
        assert_eq!(*fx.host.deleted.lock(), vec![fx.entry.id]);
    }
}
