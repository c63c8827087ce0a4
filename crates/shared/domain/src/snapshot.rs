use crate::identity::Identity;
use crate::schema::Schema;
use crate::value::FieldValue;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const CREATED_BY: &str = "created_by";
pub const ENABLED: &str = "enabled";
pub const SCHEMA: &str = "schema";

/// Names owned by every snapshot; schema fields may not reuse them.
pub const RESERVED_FIELDS: [&str; 5] = [ID, CREATED_AT, CREATED_BY, ENABLED, SCHEMA];

/// One immutable version of a configuration.
///
/// `id` and `created_at` are assigned by the store on append. A snapshot without them is a
/// transient default (or a candidate) and has never been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Snapshot {
    /// The default-valued, never-persisted snapshot of `schema`.
    #[must_use]
    pub fn transient(schema: &Schema) -> Self {
        Self {
            schema: schema.name().to_owned(),
            id: None,
            created_at: None,
            created_by: None,
            enabled: false,
            fields: schema
                .fields()
                .iter()
                .map(|f| (f.name().to_owned(), f.default_value().clone()))
                .collect(),
        }
    }

    /// Transient default with the identity's key values filled in.
    #[must_use]
    pub fn transient_for(schema: &Schema, identity: &Identity) -> Self {
        let mut snapshot = Self::transient(schema);
        for (key, value) in schema.key_fields().iter().zip(identity.values()) {
            snapshot.fields.insert(key.clone(), value.clone());
        }
        snapshot
    }

    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Declared field value. Base fields are not reachable here; see [`Snapshot::value`].
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Any field value, base fields included, in its comparable form.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        match name {
            ID => Some(self.id.and_then(|id| i64::try_from(id).ok()).into()),
            CREATED_AT => Some(
                self.created_at.map(|at| at.to_rfc3339_opts(SecondsFormat::Micros, true)).into(),
            ),
            CREATED_BY => Some(self.created_by.clone().into()),
            ENABLED => Some(self.enabled.into()),
            SCHEMA => Some(self.schema.as_str().into()),
            other => self.fields.get(other).cloned(),
        }
    }

    /// Identity of this snapshot under `schema`, missing key values read as null.
    #[must_use]
    pub fn identity(&self, schema: &Schema) -> Identity {
        schema
            .key_fields()
            .iter()
            .map(|k| self.fields.get(k).cloned().unwrap_or(FieldValue::Null))
            .collect()
    }

    /// Whether every `(field, value)` pair matches this snapshot.
    pub fn matches(&self, filter: &[(String, FieldValue)]) -> bool {
        filter.iter().all(|(name, value)| self.value(name).as_ref() == Some(value))
    }

    /// Store ordering key: newest `created_at` first, then highest `id`.
    pub fn order_key(&self) -> (Option<DateTime<Utc>>, Option<u64>) {
        (self.created_at, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::builder("example")
            .field(FieldDescriptor::text("string_field"))
            .field(FieldDescriptor::integer("int_field").with_default(10))
            .build()
            .unwrap()
    }

    #[test]
    fn transient_uses_schema_defaults() {
        let snapshot = Snapshot::transient(&schema());
        assert!(!snapshot.enabled);
        assert!(!snapshot.is_persisted());
        assert_eq!(snapshot.field("int_field"), Some(&FieldValue::Integer(10)));
        assert_eq!(snapshot.field("string_field"), Some(&FieldValue::Text(String::new())));
        assert_eq!(snapshot.value(ID), Some(FieldValue::Null));
    }

    #[test]
    fn serializes_flat() {
        let mut snapshot = Snapshot::transient(&schema());
        snapshot.id = Some(3);
        snapshot.enabled = true;
        let raw = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(raw["id"], json!(3));
        assert_eq!(raw["int_field"], json!(10));
        assert_eq!(raw["schema"], json!("example"));

        let back: Snapshot = serde_json::from_value(raw).unwrap();
        assert_eq!(back, snapshot);
    }
}
