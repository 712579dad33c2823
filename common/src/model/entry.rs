use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single form submission.
///
/// Serialises to the flat object the Web API expects: the fixed properties
/// side by side with the submitted values keyed by field id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    /// Id of the form the entry belongs to. Local on this site, remote once
    /// the entry has been prepared for forwarding.
    pub form_id: String,
    /// UTC creation time, `YYYY-MM-DD HH:MM:SS`.
    pub date_created: String,
    /// Identifier of the site the entry was submitted on.
    #[serde(rename = "gf_aggregator_id", default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl Entry {
    /// The persisted origin identifier, ignoring blank values.
    pub fn stored_origin(&self) -> Option<&str> {
        self.origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}
