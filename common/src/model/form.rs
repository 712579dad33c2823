use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A form definition. Submissions (entries) are instances of it.
///
/// Only the properties the aggregator reads are modelled; anything else the
/// form carries is kept in `extra` so that the copy created on the central
/// site matches the local one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Local id. Assigned by the host when the form is saved and stripped
    /// before the form is sent to another site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: u32,
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(rename = "isRequired", default)]
    pub is_required: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_field_type() -> String {
    "text".to_string()
}

impl Form {
    pub fn new(title: &str, fields: Vec<Field>) -> Self {
        Form {
            id: None,
            title: title.to_string(),
            description: String::new(),
            fields,
            extra: Map::new(),
        }
    }

    /// Checks submitted values against the field definitions.
    ///
    /// Value keys are field ids, optionally with an input suffix (`"2.3"` for
    /// the third input of field 2).
    pub fn validate_submission(&self, values: &BTreeMap<String, Value>) -> Result<(), String> {
        for key in values.keys() {
            if !self.fields.iter().any(|f| f.owns_key(key)) {
                return Err(format!("Unknown field '{}'", key));
            }
        }

        for field in self.fields.iter().filter(|f| f.is_required) {
            let answered = values
                .iter()
                .filter(|(k, _)| field.owns_key(k))
                .any(|(_, v)| !is_blank(v));
            if !answered {
                return Err(format!("Field '{}' is required", field.label));
            }
        }

        Ok(())
    }
}

impl Field {
    pub fn new(id: u32, label: &str, is_required: bool) -> Self {
        Field {
            id,
            label: label.to_string(),
            field_type: default_field_type(),
            is_required,
            extra: Map::new(),
        }
    }

    /// Whether `key` names this field: `"2"`, or `"2.3"` for one of its
    /// inputs. Other spellings of the id (`"02"`, `"+2"`) do not match.
    fn owns_key(&self, key: &str) -> bool {
        let (id, input) = match key.split_once('.') {
            Some((id, input)) => (id, Some(input)),
            None => (key, None),
        };
        id == self.id.to_string()
            && input.map_or(true, |n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
