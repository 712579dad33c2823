//! Error types for each layer of the aggregator.
//!
//! "Not configured" is not an error: the replication engine reports it as a
//! skipped outcome. Everything here is reported through the log and, for
//! HTTP handlers, mapped onto a status code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored {what} is not valid JSON: {source}")]
    Corrupt {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No settings saved for form {0}")]
    MissingFormSettings(i64),
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Could not reach remote site: {0}")]
    Transport(String),

    #[error("Remote site answered with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Remote site rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from remote site: {0}")]
    InvalidResponse(String),

    #[error("Could not sign request: {0}")]
    Signature(String),
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Entry {0} does not exist")]
    EntryNotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ReplicationError {
    #[error("Creating form {form_id} on the remote site failed: {source}")]
    RemoteFormCreationFailed {
        form_id: i64,
        #[source]
        source: RemoteError,
    },

    #[error("Forwarding entry {entry_id} failed: {source}")]
    RemoteEntryForwardFailed {
        entry_id: i64,
        #[source]
        source: RemoteError,
    },

    #[error("Form {0} has no local id")]
    UnsavedForm(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
