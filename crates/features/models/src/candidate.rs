use crate::error::ConfigError;
use serde_json::{Map, Value};
use vconf_domain::snapshot::{CREATED_AT, CREATED_BY, ENABLED, ID, SCHEMA};
use vconf_domain::{FieldKind, FieldValue, Schema, Snapshot};

/// Builds a transient snapshot from loosely typed field values.
///
/// Gaps are filled with schema defaults. Many-to-many fields are dropped, and so are the
/// store-assigned `id`, `created_at` and `created_by`. Any field may be `null`.
pub fn parse(schema: &Schema, raw: &Map<String, Value>) -> Result<Snapshot, ConfigError> {
    let mut snapshot = Snapshot::transient(schema);

    for (name, value) in raw {
        match name.as_str() {
            ID | CREATED_AT | CREATED_BY => {},
            SCHEMA => {
                if value.as_str().is_some_and(|s| s != schema.name()) {
                    return Err(ConfigError::InvalidArgument {
                        message: format!("candidate names schema {value}").into(),
                        context: Some(schema.name().to_owned().into()),
                    });
                }
            },
            ENABLED => {
                snapshot.enabled = FieldValue::coerce(FieldKind::Boolean, value)
                    .and_then(|v| v.as_bool())
                    .ok_or_else(|| invalid(schema, name, FieldKind::Boolean, value))?;
            },
            _ => {
                let field = schema.field(name).ok_or_else(|| ConfigError::UnknownField {
                    message: name.clone().into(),
                    context: Some(schema.name().to_owned().into()),
                })?;
                if field.kind().is_many_to_many() {
                    continue;
                }
                let parsed = if value.is_null() {
                    FieldValue::Null
                } else {
                    FieldValue::coerce(field.kind(), value)
                        .ok_or_else(|| invalid(schema, name, field.kind(), value))?
                };
                snapshot.fields.insert(name.clone(), parsed);
            },
        }
    }

    Ok(snapshot)
}

/// Checks a snapshot built in code against `schema` and fills missing fields with defaults.
pub fn conform(schema: &Schema, mut snapshot: Snapshot) -> Result<Snapshot, ConfigError> {
    if let Some(unknown) = snapshot.fields.keys().find(|name| schema.field(name).is_none()) {
        return Err(ConfigError::UnknownField {
            message: unknown.clone().into(),
            context: Some(schema.name().to_owned().into()),
        });
    }

    for field in schema.fields() {
        match snapshot.fields.get(field.name()) {
            None => {
                snapshot.fields.insert(field.name().to_owned(), field.default_value().clone());
            },
            Some(value) if !value.is_null() && !value.fits(field.kind()) => {
                return Err(invalid(schema, field.name(), field.kind(), &value.to_json()));
            },
            Some(_) => {},
        }
    }

    schema.name().clone_into(&mut snapshot.schema);
    Ok(snapshot)
}

fn invalid(schema: &Schema, name: &str, kind: FieldKind, value: &Value) -> ConfigError {
    ConfigError::InvalidValue {
        message: format!("{value} is not a valid {kind} for field '{name}'").into(),
        context: Some(schema.name().to_owned().into()),
    }
}
