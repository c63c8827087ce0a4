use crate::error::{StoreError, StoreErrorExt};
use std::fmt::Debug;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use vconf_domain::Snapshot;

/// Storage under a [`Journal`]: an append-only byte sink that can be synced and cut back.
pub(crate) trait JournalSink: Write + Debug + Send + Sync {
    fn sync(&mut self) -> io::Result<()>;
    fn size(&self) -> io::Result<u64>;
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl JournalSink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)?;
        self.sync_data()
    }
}

/// Append-only JSON-lines file, one persisted snapshot per line.
#[derive(Debug)]
pub(crate) struct Journal {
    path: PathBuf,
    sink: Box<dyn JournalSink>,
    /// Set when a failed append could not be rolled back; every later append is refused.
    poisoned: bool,
}

impl Journal {
    /// Opens (creating if needed) the journal and replays every stored row in file order.
    pub(crate) fn open(path: &Path) -> Result<(Self, Vec<Snapshot>), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create journal directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .context(format!("Failed to open journal: {}", path.display()))?;

        let rows = Self::replay(&file, path)?;
        info!(path = %path.display(), rows = rows.len(), "Journal replayed");

        Ok((Self::with_sink(path, Box::new(file)), rows))
    }

    pub(crate) fn with_sink(path: &Path, sink: Box<dyn JournalSink>) -> Self {
        Self { path: path.to_path_buf(), sink, poisoned: false }
    }

    pub(crate) fn replay<R: Read>(reader: R, path: &Path) -> Result<Vec<Snapshot>, StoreError> {
        let mut rows = Vec::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.context(format!("Failed to read journal: {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }

            let row: Snapshot = serde_json::from_str(&line).map_err(|err| StoreError::Corrupted {
                message: format!("line {}: {err}", index + 1).into(),
                context: Some(path.display().to_string().into()),
            })?;
            if row.id.is_none() || row.created_at.is_none() {
                return Err(StoreError::Corrupted {
                    message: format!("line {}: record has no id or timestamp", index + 1).into(),
                    context: Some(path.display().to_string().into()),
                });
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// Writes and syncs one row. The row must not become visible if this fails.
    ///
    /// A failed write or sync cuts the file back to its previous length, so no partial line is
    /// left behind. If even that fails the journal refuses every further append.
    pub(crate) fn write(&mut self, row: &Snapshot) -> Result<(), StoreError> {
        if self.poisoned {
            return Err(StoreError::Internal {
                message: "journal is unusable after a failed append".into(),
                context: Some(self.path.display().to_string().into()),
            });
        }

        let mut line = serde_json::to_vec(row).context("Encoding journal line")?;
        line.push(b'\n');

        let previous = self
            .sink
            .size()
            .context(format!("Failed to stat journal: {}", self.path.display()))?;

        if let Err(err) = self.sink.write_all(&line).and_then(|()| self.sink.sync()) {
            self.roll_back(previous);
            return Err(err)
                .context(format!("Failed to append to journal: {}", self.path.display()));
        }

        debug!(id = row.id, schema = %row.schema, "Journal line written");
        Ok(())
    }

    fn roll_back(&mut self, len: u64) {
        match self.sink.truncate(len) {
            Ok(()) => warn!(path = %self.path.display(), len, "Journal append rolled back"),
            Err(err) => {
                error!(path = %self.path.display(), %err, "Journal rollback failed");
                self.poisoned = true;
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::DateTime;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory sink that can be told to fail part-way through a write, on sync, or on
    /// truncate.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct FlakySink {
        pub(crate) bytes: Arc<Mutex<Vec<u8>>>,
        pub(crate) fail_write_after: Arc<Mutex<Option<usize>>>,
        pub(crate) fail_sync: Arc<Mutex<bool>>,
        pub(crate) fail_truncate: Arc<Mutex<bool>>,
    }

    impl Write for FlakySink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let limit = *self.fail_write_after.lock();
            match limit {
                Some(0) => Err(io::Error::other("disk full")),
                Some(left) => {
                    let n = left.min(buf.len());
                    self.bytes.lock().extend_from_slice(&buf[..n]);
                    *self.fail_write_after.lock() = Some(left - n);
                    Ok(n)
                },
                None => {
                    self.bytes.lock().extend_from_slice(buf);
                    Ok(buf.len())
                },
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl JournalSink for FlakySink {
        fn sync(&mut self) -> io::Result<()> {
            if *self.fail_sync.lock() { Err(io::Error::other("sync failed")) } else { Ok(()) }
        }

        fn size(&self) -> io::Result<u64> {
            Ok(self.bytes.lock().len() as u64)
        }

        fn truncate(&mut self, len: u64) -> io::Result<()> {
            if *self.fail_truncate.lock() {
                return Err(io::Error::other("truncate failed"));
            }
            self.bytes.lock().truncate(usize::try_from(len).unwrap());
            Ok(())
        }
    }

    pub(crate) fn row(id: u64, text: &str) -> Snapshot {
        let mut row = Snapshot {
            schema: "example".into(),
            id: Some(id),
            created_at: Some(DateTime::UNIX_EPOCH),
            created_by: None,
            enabled: true,
            fields: Default::default(),
        };
        row.set("text", text);
        row
    }

    fn journal(sink: &FlakySink) -> Journal {
        Journal::with_sink(Path::new("memory.jsonl"), Box::new(sink.clone()))
    }

    fn replayed(sink: &FlakySink) -> Vec<Snapshot> {
        let bytes = sink.bytes.lock().clone();
        Journal::replay(bytes.as_slice(), Path::new("memory.jsonl")).unwrap()
    }

    #[test]
    fn torn_write_is_cut_back() {
        let sink = FlakySink::default();
        let mut journal = journal(&sink);
        journal.write(&row(1, "small")).unwrap();

        *sink.fail_write_after.lock() = Some(8);
        let large = row(2, &"x".repeat(20_000));
        assert!(matches!(journal.write(&large), Err(StoreError::Io { .. })));

        *sink.fail_write_after.lock() = None;
        journal.write(&row(2, "after")).unwrap();

        let rows = replayed(&sink);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), [Some(1), Some(2)]);
        assert_eq!(rows[1].field("text"), Some(&vconf_domain::FieldValue::from("after")));
    }

    #[test]
    fn failed_sync_removes_the_whole_line() {
        let sink = FlakySink::default();
        let mut journal = journal(&sink);

        *sink.fail_sync.lock() = true;
        assert!(journal.write(&row(1, "lost")).is_err());
        assert!(sink.bytes.lock().is_empty());

        *sink.fail_sync.lock() = false;
        journal.write(&row(1, "kept")).unwrap();
        assert_eq!(replayed(&sink).len(), 1);
    }

    #[test]
    fn failed_rollback_refuses_further_appends() {
        let sink = FlakySink::default();
        let mut journal = journal(&sink);
        journal.write(&row(1, "small")).unwrap();

        *sink.fail_write_after.lock() = Some(4);
        *sink.fail_truncate.lock() = true;
        assert!(journal.write(&row(2, "torn")).is_err());

        *sink.fail_write_after.lock() = None;
        assert!(matches!(journal.write(&row(2, "next")), Err(StoreError::Internal { .. })));
    }
}
