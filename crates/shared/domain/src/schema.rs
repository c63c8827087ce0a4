use crate::error::DomainError;
use crate::snapshot::RESERVED_FIELDS;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache lifetime of a schema's entries unless the schema overrides it.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(600);

/// Storage kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Boolean,
    Integer,
    Text,
    ManyToMany,
}

impl FieldKind {
    /// The value a field of this kind holds when the schema declares no default.
    #[must_use]
    pub const fn zero(self) -> FieldValue {
        match self {
            Self::Boolean => FieldValue::Bool(false),
            Self::Integer => FieldValue::Integer(0),
            Self::Text => FieldValue::Text(String::new()),
            Self::ManyToMany => FieldValue::List(Vec::new()),
        }
    }

    #[must_use]
    pub const fn is_many_to_many(self) -> bool {
        matches!(self, Self::ManyToMany)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::ManyToMany => "many_to_many",
        })
    }
}

/// A declared field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    default: FieldValue,
    compare: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind, default: kind.zero(), compare: !kind.is_many_to_many() }
    }

    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    #[must_use]
    pub fn many_to_many(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::ManyToMany)
    }

    /// Overrides the kind's zero value. Checked against the kind when the schema is built.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = default.into();
        self
    }

    /// Excludes the field from equality checks.
    #[must_use]
    pub const fn ignored_in_equality(mut self) -> Self {
        self.compare = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub const fn default_value(&self) -> &FieldValue {
        &self.default
    }

    /// Many-to-many fields never take part in equality, whatever the flag says.
    pub const fn is_compared(&self) -> bool {
        self.compare && !self.kind.is_many_to_many()
    }
}

/// Declarative description of one configuration type.
///
/// A schema is immutable once built; use [`Schema::builder`] to create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    key_fields: Vec<String>,
    fields: Vec<FieldDescriptor>,
    cache_timeout: Duration,
}

impl Schema {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            key_fields: Vec::new(),
            fields: Vec::new(),
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered key fields forming a configuration identity. Empty for a singleton schema.
    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }

    pub fn is_keyed(&self) -> bool {
        !self.key_fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub const fn cache_timeout(&self) -> Duration {
        self.cache_timeout
    }

    /// Fields that take part in equality, in declaration order.
    pub fn compared_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_compared())
    }
}

/// Builder for [`Schema`], validated on [`SchemaBuilder::build`].
#[derive(Debug)]
#[must_use]
pub struct SchemaBuilder {
    name: String,
    key_fields: Vec<String>,
    fields: Vec<FieldDescriptor>,
    cache_timeout: Duration,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn key_field(mut self, name: impl Into<String>) -> Self {
        self.key_fields.push(name.into());
        self
    }

    pub fn key_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_fields.extend(names.into_iter().map(Into::into));
        self
    }

    pub const fn cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Schema, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidSchema {
                message: "schema name must not be empty".into(),
                context: None,
            });
        }
        let invalid = |message: String| DomainError::InvalidSchema {
            message: message.into(),
            context: Some(self.name.clone().into()),
        };

        for (i, field) in self.fields.iter().enumerate() {
            if RESERVED_FIELDS.contains(&field.name.as_str()) {
                return Err(invalid(format!("field name '{}' is reserved", field.name)));
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(invalid(format!("field '{}' is declared twice", field.name)));
            }
            if !field.default.fits(field.kind) {
                return Err(invalid(format!(
                    "default of field '{}' does not fit kind {}",
                    field.name, field.kind
                )));
            }
        }

        for (i, key) in self.key_fields.iter().enumerate() {
            if self.key_fields[..i].contains(key) {
                return Err(invalid(format!("key field '{key}' is listed twice")));
            }
            match self.fields.iter().find(|f| &f.name == key) {
                None => return Err(invalid(format!("key field '{key}' is not a declared field"))),
                Some(f) if f.kind.is_many_to_many() => {
                    return Err(invalid(format!("key field '{key}' cannot be many-to-many")));
                },
                Some(_) => {},
            }
        }

        Ok(Schema {
            name: self.name,
            key_fields: self.key_fields,
            fields: self.fields,
            cache_timeout: self.cache_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_keyed_schema() {
        let schema = Schema::builder("keyed")
            .field(FieldDescriptor::text("left"))
            .field(FieldDescriptor::text("right"))
            .field(FieldDescriptor::integer("int_field").with_default(10))
            .key_fields(["left", "right"])
            .build()
            .unwrap();

        assert!(schema.is_keyed());
        assert_eq!(schema.key_fields(), ["left", "right"]);
        assert_eq!(schema.field("int_field").unwrap().default_value(), &FieldValue::Integer(10));
        assert_eq!(schema.cache_timeout(), DEFAULT_CACHE_TIMEOUT);
    }

    #[test]
    fn rejects_reserved_and_duplicate_names() {
        let reserved = Schema::builder("s").field(FieldDescriptor::boolean("enabled")).build();
        assert!(matches!(reserved, Err(DomainError::InvalidSchema { .. })));

        let twice = Schema::builder("s")
            .field(FieldDescriptor::text("a"))
            .field(FieldDescriptor::integer("a"))
            .build();
        assert!(twice.is_err());
    }

    #[test]
    fn rejects_bad_key_fields_and_defaults() {
        let missing = Schema::builder("s").key_field("ghost").build();
        assert!(missing.unwrap_err().to_string().contains("ghost"));

        let m2m = Schema::builder("s")
            .field(FieldDescriptor::many_to_many("tags"))
            .key_field("tags")
            .build();
        assert!(m2m.is_err());

        let bad_default =
            Schema::builder("s").field(FieldDescriptor::integer("n").with_default("ten")).build();
        assert!(bad_default.is_err());

        assert!(Schema::builder("  ").build().is_err());
    }

    #[test]
    fn many_to_many_is_never_compared() {
        let schema = Schema::builder("s")
            .field(FieldDescriptor::text("a"))
            .field(FieldDescriptor::text("b").ignored_in_equality())
            .field(FieldDescriptor::many_to_many("tags"))
            .build()
            .unwrap();
        let compared: Vec<_> = schema.compared_fields().map(FieldDescriptor::name).collect();
        assert_eq!(compared, ["a"]);
    }
}
