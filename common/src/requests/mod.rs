use crate::model::entry_meta::FilterOperator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Payload of `POST /api/entries/submit/{form_id}`: values keyed by field id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitEntryRequest {
    pub values: BTreeMap<String, Value>,
}

/// Query of `GET /api/entries/{form_id}`, filtering on the origin identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFilterQuery {
    pub operator: Option<FilterOperator>,
    pub value: Option<String>,
}

/// Answer to a submission. `retained` is false when the entry was forwarded
/// and then removed from this site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitEntryResponse {
    pub entry_id: i64,
    pub retained: bool,
}
