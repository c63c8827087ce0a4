//! Cache key naming.
//!
//! Keys embed the schema name and the [`Display`](std::fmt::Display) form of the identity, so a
//! value and its string form resolve to the same entry once normalized. Commas inside text
//! values are escaped, so they never split a value in two.

use crate::error::ConfigError;
use vconf_domain::{FieldValue, Identity, Schema};

const PREFIX: &str = "configuration";

/// Checks arity and brings every key value to its field's kind.
///
/// `"7"` given for an integer key field becomes `7`; nulls pass through untouched.
pub fn identity_for(schema: &Schema, keys: &[FieldValue]) -> Result<Identity, ConfigError> {
    let expected = schema.key_fields().len();
    if keys.len() != expected {
        let message = if schema.is_keyed() {
            format!("cache_key_name() takes exactly {expected} arguments ({} given)", keys.len())
        } else {
            format!("{} has no key fields ({} given)", schema.name(), keys.len())
        };
        return Err(ConfigError::InvalidArgument { message: message.into(), context: None });
    }

    schema
        .key_fields()
        .iter()
        .zip(keys)
        .map(|(name, value)| {
            let Some(field) = schema.field(name) else {
                return Err(ConfigError::UnknownField { message: name.clone().into(), context: None });
            };
            if value.is_null() || value.fits(field.kind()) {
                return Ok(value.clone());
            }
            FieldValue::coerce(field.kind(), &value.to_json()).ok_or_else(|| {
                ConfigError::InvalidValue {
                    message: format!("'{value}' is not a valid {} for key '{name}'", field.kind())
                        .into(),
                    context: Some(schema.name().to_owned().into()),
                }
            })
        })
        .collect()
}

/// `configuration/{schema}/current` or `configuration/{schema}/current/{v1},{v2},..`.
pub fn current_key(schema: &Schema, identity: &Identity) -> String {
    if schema.is_keyed() {
        format!("{PREFIX}/{}/current/{identity}", schema.name())
    } else {
        format!("{PREFIX}/{}/current", schema.name())
    }
}

/// `configuration/{schema}/key_values/{f1},{f2},..`. An empty list means every key field.
pub fn key_values_key<S: AsRef<str>>(schema: &Schema, fields: &[S]) -> String {
    let joined = if fields.is_empty() {
        schema.key_fields().join(",")
    } else {
        fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
    };
    format!("{PREFIX}/{}/key_values/{joined}", schema.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vconf_domain::FieldDescriptor;

    fn keyed() -> Schema {
        Schema::builder("ExampleKeyedConfig")
            .field(FieldDescriptor::text("left"))
            .field(FieldDescriptor::text("right"))
            .field(FieldDescriptor::integer("user"))
            .key_fields(["left", "right", "user"])
            .build()
            .unwrap()
    }

    #[test]
    fn unkeyed_current_key() {
        let schema = Schema::builder("ExampleConfig").build().unwrap();
        let identity = identity_for(&schema, &[]).unwrap();
        assert_eq!(current_key(&schema, &identity), "configuration/ExampleConfig/current");
    }

    #[test]
    fn keyed_current_key_normalizes_values() {
        let schema = keyed();
        let from_int = identity_for(&schema, &["left".into(), "right".into(), 3.into()]).unwrap();
        let from_str = identity_for(&schema, &["left".into(), "right".into(), "3".into()]).unwrap();

        assert_eq!(from_int, from_str);
        assert_eq!(
            current_key(&schema, &from_int),
            "configuration/ExampleKeyedConfig/current/left,right,3"
        );
    }

    #[test]
    fn commas_and_nulls_in_keys_stay_distinct() {
        let schema = keyed();
        let key = |left: FieldValue, right: FieldValue| {
            current_key(&schema, &identity_for(&schema, &[left, right, 1.into()]).unwrap())
        };

        let split_left = key("a,b".into(), "c".into());
        let split_right = key("a".into(), "b,c".into());
        assert_ne!(split_left, split_right);
        assert_eq!(split_left, r"configuration/ExampleKeyedConfig/current/a\,b,c,1");

        assert_ne!(key(FieldValue::Null, "r".into()), key("None".into(), "r".into()));
    }

    #[test]
    fn arity_is_checked() {
        let err = identity_for(&keyed(), &["left".into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: cache_key_name() takes exactly 3 arguments (1 given)"
        );

        let unkeyed = Schema::builder("plain").build().unwrap();
        assert!(matches!(
            identity_for(&unkeyed, &["x".into()]),
            Err(ConfigError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn uncoercible_key_is_rejected() {
        let err = identity_for(&keyed(), &["l".into(), "r".into(), "three".into()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn key_values_keys_follow_argument_order() {
        let schema = keyed();
        let none: [&str; 0] = [];
        assert_eq!(
            key_values_key(&schema, &none),
            "configuration/ExampleKeyedConfig/key_values/left,right,user"
        );
        assert_eq!(
            key_values_key(&schema, &["right", "left"]),
            "configuration/ExampleKeyedConfig/key_values/right,left"
        );
    }
}
