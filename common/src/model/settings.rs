use serde::{Deserialize, Serialize};

/// Installation-wide aggregator settings.
///
/// A site with an empty `remote_base_url` (or missing credentials) is a
/// receiver only: it accepts entries from other sites but never forwards its
/// own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Base URL of the central site's Web API, e.g. `http://example.com/gravityformsapi`.
    pub remote_base_url: String,
    /// API key issued by the central site.
    pub public_key: String,
    /// Private key used to sign requests to the central site.
    pub private_key: String,
    /// Tag attached to forwarded entries. The central site filters on it.
    pub local_identifier: String,
    /// Whether the aggregation results page is offered on this site.
    pub results_enabled: bool,
}

/// Connection details for the central site, only available once every part
/// of it has been configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    pub base_url: String,
    pub public_key: String,
    pub private_key: String,
}

impl SiteSettings {
    /// Returns the remote endpoint, or `None` when this site only receives.
    pub fn remote_endpoint(&self) -> Option<RemoteEndpoint> {
        let base_url = self.remote_base_url.trim();
        let public_key = self.public_key.trim();
        let private_key = self.private_key.trim();

        if base_url.is_empty() || public_key.is_empty() || private_key.is_empty() {
            return None;
        }

        Some(RemoteEndpoint {
            base_url: base_url.to_string(),
            public_key: public_key.to_string(),
            private_key: private_key.to_string(),
        })
    }

    /// Checks values submitted through the settings surface.
    pub fn validate(&self) -> Result<(), String> {
        let url = self.remote_base_url.trim();
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!(
                "Remote URL must start with http:// or https://, got '{}'",
                url
            ));
        }
        Ok(())
    }
}

/// Resolves the origin identifier for this installation.
///
/// The configured identifier wins when it is non-empty; otherwise the
/// installation display name is used. The fallback is never written back.
pub fn effective_identifier(settings: Option<&SiteSettings>, display_name: &str) -> String {
    match settings.map(|s| s.local_identifier.trim()) {
        Some(identifier) if !identifier.is_empty() => identifier.to_string(),
        _ => display_name.to_string(),
    }
}

/// Per-form replication settings, keyed by the local form id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    pub enabled: bool,
    /// Id of the matching form on the central site. Empty until the first
    /// forwarded entry creates it, unless an administrator entered it.
    pub remote_form_id: String,
    pub delete_after_forward: bool,
}

impl FormSettings {
    pub fn remote_form_id(&self) -> Option<&str> {
        let id = self.remote_form_id.trim();
        if id.is_empty() { None } else { Some(id) }
    }
}
