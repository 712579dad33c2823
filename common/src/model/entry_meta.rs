use serde::{Deserialize, Serialize};

/// Entry meta key carrying the origin site identifier.
pub const ORIGIN_META_KEY: &str = "gf_aggregator_id";

/// Describes a computed entry column for entry lists, search and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetaDefinition {
    pub key: String,
    pub label: String,
    pub is_numeric: bool,
    /// Shown in the entry list without the user picking it.
    pub is_default_column: bool,
    pub filter: MetaFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFilter {
    pub operators: Vec<FilterOperator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Is,
    IsNot,
    Contains,
}

impl FilterOperator {
    /// `is` and `isnot` compare exactly, `contains` ignores case.
    pub fn matches(self, value: &str, needle: &str) -> bool {
        match self {
            FilterOperator::Is => value == needle,
            FilterOperator::IsNot => value != needle,
            FilterOperator::Contains => value.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}
