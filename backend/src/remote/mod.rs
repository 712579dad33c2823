//! Access to the central site's Web API.
//!
//! The replication engine talks to the remote site through [`RemoteApi`] and
//! obtains a client for the currently configured endpoint from a
//! [`RemoteConnector`]. Site settings can change between submissions, so a
//! client is built per replication instead of once at startup.

mod signature;
mod web_api;

pub use web_api::WebApiConnector;

use crate::error::RemoteError;
use common::model::entry::Entry;
use common::model::form::Form;
use common::model::settings::RemoteEndpoint;

pub trait RemoteApi {
    /// Creates `form` on the remote site and returns the id it was given there.
    fn create_form(&self, form: &Form) -> Result<String, RemoteError>;

    /// Creates `entry` on the remote site. The entry must already carry the
    /// remote form id.
    fn create_entry(&self, entry: &Entry) -> Result<(), RemoteError>;
}

pub trait RemoteConnector: Send + Sync {
    fn connect(&self, endpoint: &RemoteEndpoint) -> Box<dyn RemoteApi>;
}
