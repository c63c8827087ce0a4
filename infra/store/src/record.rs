use crate::error::StoreError;
use std::fmt::Debug;
use vconf_domain::{FieldValue, Snapshot};

/// Equality filter over snapshot fields (base fields included).
pub type KeyFilter = [(String, FieldValue)];

/// An append-only table of configuration snapshots.
///
/// Rows are never updated or deleted. "Current" always means the row with the greatest
/// `(created_at, id)` pair among the rows of one identity.
pub trait RecordStore: Debug + Send + Sync {
    /// Inserts `record` as a new row, assigning its `id` and `created_at`.
    fn append(&self, record: Snapshot) -> Result<Snapshot, StoreError>;

    /// The current row of `schema` among those matching `filter`.
    fn latest(&self, schema: &str, filter: &KeyFilter) -> Result<Option<Snapshot>, StoreError>;

    /// Distinct value combinations of `fields` over every row, in first-seen order.
    fn distinct(&self, schema: &str, fields: &[String]) -> Result<Vec<Vec<FieldValue>>, StoreError>;

    /// The current row of every identity formed by `key_fields`, in first-seen order.
    fn current_set(&self, schema: &str, key_fields: &[String]) -> Result<Vec<Snapshot>, StoreError>;

    /// Every row of `schema`, newest first.
    fn history(&self, schema: &str) -> Result<Vec<Snapshot>, StoreError>;

    fn count(&self, schema: &str) -> Result<usize, StoreError>;
}
