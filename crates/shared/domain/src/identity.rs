use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered tuple of key-field values naming one configuration. Empty for singleton schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Vec<FieldValue>);

impl Identity {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_values(self) -> Vec<FieldValue> {
        self.0
    }
}

/// Comma-joined string forms, the suffix of a keyed cache key.
///
/// Backslashes and commas inside text are escaped with a backslash and null renders as `\N`,
/// so two different identities never share a suffix.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match value {
                FieldValue::Null => f.write_str("\\N")?,
                FieldValue::Text(text) => {
                    for c in text.chars() {
                        if matches!(c, '\\' | ',') {
                            f.write_str("\\")?;
                        }
                        write!(f, "{c}")?;
                    }
                },
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

impl From<Vec<FieldValue>> for Identity {
    fn from(values: Vec<FieldValue>) -> Self {
        Self(values)
    }
}

impl FromIterator<FieldValue> for Identity {
    fn from_iter<T: IntoIterator<Item = FieldValue>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of a key-values enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValues {
    /// One tuple per distinct combination.
    Tuples(Vec<Vec<FieldValue>>),
    /// Single-field enumeration flattened to bare values.
    Flat(Vec<FieldValue>),
}

impl KeyValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Tuples(rows) => rows.len(),
            Self::Flat(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows as tuples, whichever form was requested.
    pub fn rows(&self) -> Vec<Vec<FieldValue>> {
        match self {
            Self::Tuples(rows) => rows.clone(),
            Self::Flat(values) => values.iter().cloned().map(|v| vec![v]).collect(),
        }
    }
}
