use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One schema's worth of configuration rows, as exchanged by import and export.
///
/// ```json
/// {"model": "ExampleConfig", "data": [{"enabled": true, "int_field": 5}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub model: String,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}

/// Import input: a single document or a list of them (the shape `dump` writes).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Documents {
    One(Document),
    Many(Vec<Document>),
}

impl Documents {
    pub(crate) fn into_vec(self) -> Vec<Document> {
        match self {
            Self::One(document) => vec![document],
            Self::Many(documents) => documents,
        }
    }
}
