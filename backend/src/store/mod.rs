//! # SQLite Storage
//!
//! All persistent state of an installation lives in one SQLite database:
//!
//! - `site_settings`: a single row with the remote site connection and the
//!   local identifier.
//! - `form_settings`: replication settings per local form, including the id
//!   of the matching form on the central site.
//! - `forms` / `entries`: the local form definitions and their submissions,
//!   stored as JSON documents.
//!
//! The replication engine only sees the [`ConfigurationStore`] trait. The
//! form and entry accessors are inherent methods used by the HTTP services
//! and the host hooks.
//!
//! Several worker processes may open the same database file. Writers wait on
//! each other through SQLite's busy timeout, and the lazy remote form id write
//! goes through [`ConfigurationStore::claim_remote_form_id`] so that a stale
//! read can never overwrite an id another worker already stored.

mod entries;
mod forms;
mod settings;

use crate::error::StoreError;
use common::model::settings::{FormSettings, SiteSettings};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS site_settings (
    id               INTEGER PRIMARY KEY CHECK (id = 1),
    remote_base_url  TEXT    NOT NULL DEFAULT '',
    public_key       TEXT    NOT NULL DEFAULT '',
    private_key      TEXT    NOT NULL DEFAULT '',
    local_identifier TEXT    NOT NULL DEFAULT '',
    results_enabled  INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS form_settings (
    form_id              INTEGER PRIMARY KEY,
    enabled              INTEGER NOT NULL DEFAULT 0,
    remote_form_id       TEXT    NOT NULL DEFAULT '',
    delete_after_forward INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS forms (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS entries (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    form_id      INTEGER NOT NULL,
    date_created TEXT    NOT NULL,
    origin       TEXT,
    body         TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS entries_form_id ON entries (form_id);
";

/// How long a writer waits for another process holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Read and write access to site and per-form settings.
pub trait ConfigurationStore: Send + Sync {
    /// Returns `None` until the site settings have been saved once.
    fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError>;

    fn save_site_settings(&self, settings: &SiteSettings) -> Result<(), StoreError>;

    fn form_settings(&self, form_id: i64) -> Result<Option<FormSettings>, StoreError>;

    /// Replaces the settings of a form, including an explicit remote form id.
    fn save_form_settings(&self, form_id: i64, settings: &FormSettings) -> Result<(), StoreError>;

    /// Stores `candidate` as the remote form id unless one is already set.
    ///
    /// Returns the id stored once the call completes: `candidate` when it was
    /// written, the earlier value otherwise.
    fn claim_remote_form_id(&self, form_id: i64, candidate: &str) -> Result<String, StoreError>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }
}
