use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::journal::Journal;
use crate::record::{KeyFilter, RecordStore};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};
use vconf_domain::{FieldValue, Snapshot};

#[derive(Debug, Default)]
struct State {
    rows: Vec<Snapshot>,
    next_id: u64,
    journal: Option<Journal>,
}

/// In-memory [`RecordStore`], optionally backed by a journal file.
///
/// Ids are assigned under the table's write lock, so two appends never share an id and a later
/// append always receives a higher one.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Volatile store on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State { next_id: 1, ..State::default() })),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::default()
    }

    fn rows_of<'a>(rows: &'a [Snapshot], schema: &'a str) -> impl Iterator<Item = &'a Snapshot> {
        rows.iter().filter(move |row| row.schema == schema)
    }

    fn project(row: &Snapshot, fields: &[String]) -> Vec<FieldValue> {
        fields.iter().map(|f| row.value(f).unwrap_or(FieldValue::Null)).collect()
    }
}

impl RecordStore for MemoryStore {
    #[instrument(skip_all, fields(schema = %record.schema))]
    fn append(&self, mut record: Snapshot) -> Result<Snapshot, StoreError> {
        let mut state = self.state.write();

        record.id = Some(state.next_id);
        record.created_at = Some(self.clock.now());

        if let Some(journal) = state.journal.as_mut() {
            journal.write(&record)?;
        }

        state.next_id += 1;
        state.rows.push(record.clone());
        debug!(id = record.id, "Record appended");
        Ok(record)
    }

    fn latest(&self, schema: &str, filter: &KeyFilter) -> Result<Option<Snapshot>, StoreError> {
        let state = self.state.read();
        Ok(Self::rows_of(&state.rows, schema)
            .filter(|row| row.matches(filter))
            .max_by_key(|row| row.order_key())
            .cloned())
    }

    fn distinct(&self, schema: &str, fields: &[String]) -> Result<Vec<Vec<FieldValue>>, StoreError> {
        let state = self.state.read();
        let mut seen: Vec<Vec<FieldValue>> = Vec::new();
        for row in Self::rows_of(&state.rows, schema) {
            let values = Self::project(row, fields);
            if !seen.contains(&values) {
                seen.push(values);
            }
        }
        Ok(seen)
    }

    fn current_set(&self, schema: &str, key_fields: &[String]) -> Result<Vec<Snapshot>, StoreError> {
        let state = self.state.read();
        let mut current: Vec<(Vec<FieldValue>, &Snapshot)> = Vec::new();
        for row in Self::rows_of(&state.rows, schema) {
            let identity = Self::project(row, key_fields);
            match current.iter_mut().find(|(id, _)| *id == identity) {
                Some((_, best)) if row.order_key() > best.order_key() => *best = row,
                Some(_) => {},
                None => current.push((identity, row)),
            }
        }
        Ok(current.into_iter().map(|(_, row)| row.clone()).collect())
    }

    fn history(&self, schema: &str) -> Result<Vec<Snapshot>, StoreError> {
        let state = self.state.read();
        let mut rows: Vec<Snapshot> = Self::rows_of(&state.rows, schema).cloned().collect();
        rows.sort_by(|a, b| b.order_key().cmp(&a.order_key()));
        Ok(rows)
    }

    fn count(&self, schema: &str) -> Result<usize, StoreError> {
        Ok(Self::rows_of(&self.state.read().rows, schema).count())
    }
}

/// Builder for [`MemoryStore`].
#[derive(Debug, Default)]
#[must_use]
pub struct MemoryStoreBuilder {
    clock: Option<Arc<dyn Clock>>,
    journal: Option<PathBuf>,
}

impl MemoryStoreBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Persists every append to a JSON-lines file and replays it on open.
    pub fn journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal = Some(path.into());
        self
    }

    /// Opens the store, replaying the journal when one was configured.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the journal cannot be opened and
    /// [`StoreError::Corrupted`] if one of its lines cannot be replayed.
    pub fn open(self) -> Result<MemoryStore, StoreError> {
        let mut state = State { next_id: 1, ..State::default() };

        if let Some(path) = &self.journal {
            let (journal, rows) = Journal::open(path)?;
            state.next_id = rows.iter().filter_map(|row| row.id).max().map_or(1, |max| max + 1);
            state.rows = rows;
            state.journal = Some(journal);
        }

        Ok(MemoryStore {
            state: Arc::new(RwLock::new(state)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}
