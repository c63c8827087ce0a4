use crate::candidate;
use crate::configurations::{Cached, Configurations};
use crate::equality::{self, DEFAULT_IGNORED};
use crate::error::ConfigError;
use crate::keys;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, trace};
use vconf_cache::CachedResponse;
use vconf_domain::{FieldValue, Identity, KeyValues, Schema, Snapshot};

/// A history row annotated with whether it is the current row of its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRow {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub is_active: bool,
}

/// Handle on one schema's configuration: resolve, compare, enumerate and save.
#[derive(Debug, Clone)]
pub struct ConfigModel {
    configs: Configurations,
    schema: Arc<Schema>,
}

impl ConfigModel {
    pub(crate) const fn new(configs: Configurations, schema: Arc<Schema>) -> Self {
        Self { configs, schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Cache key of the current snapshot for `keys`.
    pub fn cache_key_name(&self, keys: &[FieldValue]) -> Result<String, ConfigError> {
        let identity = keys::identity_for(&self.schema, keys)?;
        Ok(keys::current_key(&self.schema, &identity))
    }

    /// Cache key of a key-values enumeration over `fields` (all key fields when empty).
    pub fn key_values_cache_key_name<S: AsRef<str>>(&self, fields: &[S]) -> String {
        keys::key_values_key(&self.schema, fields)
    }

    /// The current snapshot of the identity named by `keys`.
    ///
    /// Served from the cache when possible. Without any stored row the transient default is
    /// returned (and cached) but never persisted.
    pub fn current(&self, keys: &[FieldValue]) -> Result<Snapshot, ConfigError> {
        let identity = keys::identity_for(&self.schema, keys)?;
        let cache_key = keys::current_key(&self.schema, &identity);
        let cache = self.configs.cache();

        match cache.get(&cache_key) {
            CachedResponse::Found(Some(Cached::Snapshot(snapshot))) => return Ok(snapshot),
            // An explicit null is not trusted: go back to the store.
            CachedResponse::Found(_) => trace!(key = %cache_key, "Cached null, re-querying store"),
            CachedResponse::NotFound => {},
        }

        let filter: Vec<(String, FieldValue)> = self
            .schema
            .key_fields()
            .iter()
            .cloned()
            .zip(identity.values().iter().cloned())
            .collect();
        let current = match self.configs.store().latest(self.schema.name(), &filter)? {
            Some(row) => row,
            None => {
                debug!(schema = self.name(), %identity, "No stored configuration, using defaults");
                Snapshot::transient_for(&self.schema, &identity)
            },
        };

        cache.set_all_tiers(
            &cache_key,
            Some(Cached::Snapshot(current.clone())),
            self.schema.cache_timeout(),
        );
        Ok(current)
    }

    pub fn is_enabled(&self, keys: &[FieldValue]) -> Result<bool, ConfigError> {
        Ok(self.current(keys)?.enabled)
    }

    /// Parses loosely typed field values into a transient snapshot of this schema.
    pub fn candidate(&self, raw: &Map<String, Value>) -> Result<Snapshot, ConfigError> {
        candidate::parse(&self.schema, raw)
    }

    /// Whether `raw` describes exactly the current snapshot of its identity.
    ///
    /// Compares with the [`DEFAULT_IGNORED`] fields skipped. Always `false` when nothing is
    /// stored for the identity yet.
    pub fn equal_to_current(&self, raw: &Map<String, Value>) -> Result<bool, ConfigError> {
        self.equal_to_current_ignoring(raw, &DEFAULT_IGNORED)
    }

    pub fn equal_to_current_ignoring<S: AsRef<str>>(
        &self,
        raw: &Map<String, Value>,
        ignore: &[S],
    ) -> Result<bool, ConfigError> {
        let candidate = self.candidate(raw)?;
        let identity = candidate.identity(&self.schema);
        let current = self.current(identity.values())?;

        if !current.is_persisted() {
            return Ok(false);
        }
        Ok(equality::fields_equal(&self.schema, &current, &candidate, ignore))
    }

    pub fn fields_equal<S: AsRef<str>>(&self, a: &Snapshot, b: &Snapshot, ignore: &[S]) -> bool {
        equality::fields_equal(&self.schema, a, b, ignore)
    }

    /// Appends `candidate` as a new version, stamped with `created_by`.
    ///
    /// Never updates an existing row. Invalidates the identity's current entry and every
    /// key-values entry of the schema.
    #[instrument(skip_all, fields(schema = %self.schema.name()))]
    pub fn save(
        &self,
        candidate: Snapshot,
        created_by: Option<&str>,
    ) -> Result<Snapshot, ConfigError> {
        let mut record = candidate::conform(&self.schema, candidate)?;
        record.id = None;
        record.created_at = None;
        record.created_by = created_by.map(str::to_owned);

        let identity = keys::identity_for(&self.schema, record.identity(&self.schema).values())?;
        let saved = self.configs.store().append(record)?;
        self.invalidate(&identity);

        info!(id = saved.id, %identity, created_by, enabled = saved.enabled, "Configuration saved");
        Ok(saved)
    }

    /// [`ConfigModel::candidate`] followed by [`ConfigModel::save`].
    pub fn save_fields(
        &self,
        raw: &Map<String, Value>,
        created_by: Option<&str>,
    ) -> Result<Snapshot, ConfigError> {
        self.save(self.candidate(raw)?, created_by)
    }

    fn invalidate(&self, identity: &Identity) {
        let cache = self.configs.cache();
        cache.delete_all_tiers(&keys::current_key(&self.schema, identity));

        if self.schema.is_keyed() {
            let none: [&str; 0] = [];
            cache.delete_all_tiers(&keys::key_values_key(&self.schema, &none));
        }
        for key in self.configs.issued_key_values_keys(self.name()) {
            cache.delete_all_tiers(&key);
        }
    }

    /// Distinct combinations of `fields` (all key fields when empty) over every stored row.
    ///
    /// With `flat` a single field comes back as bare values.
    pub fn key_values<S: AsRef<str>>(
        &self,
        fields: &[S],
        flat: bool,
    ) -> Result<KeyValues, ConfigError> {
        let requested: Vec<String> = if fields.is_empty() {
            self.schema.key_fields().to_vec()
        } else {
            fields.iter().map(|f| f.as_ref().to_owned()).collect()
        };

        if requested.is_empty() {
            return Err(ConfigError::InvalidArgument {
                message: format!("{} has no key fields to enumerate", self.name()).into(),
                context: None,
            });
        }
        if flat && requested.len() > 1 {
            return Err(ConfigError::InvalidArgument {
                message: "'flat' is not valid when more than one field is requested".into(),
                context: Some(self.name().to_owned().into()),
            });
        }
        for name in &requested {
            let field = self.schema.field(name).ok_or_else(|| ConfigError::UnknownField {
                message: name.clone().into(),
                context: Some(self.name().to_owned().into()),
            })?;
            if field.kind().is_many_to_many() {
                return Err(ConfigError::InvalidArgument {
                    message: format!("many-to-many field '{name}' cannot be enumerated").into(),
                    context: Some(self.name().to_owned().into()),
                });
            }
        }

        let cache_key = keys::key_values_key(&self.schema, fields);
        let rows = match self.configs.cache().get(&cache_key) {
            CachedResponse::Found(Some(Cached::KeyValues(rows))) => rows,
            _ => {
                let rows = self.configs.store().distinct(self.name(), &requested)?;
                self.configs.cache().set_all_tiers(
                    &cache_key,
                    Some(Cached::KeyValues(rows.clone())),
                    self.schema.cache_timeout(),
                );
                self.configs.remember_key_values_key(self.name(), &cache_key);
                rows
            },
        };

        Ok(if flat {
            KeyValues::Flat(rows.into_iter().filter_map(|row| row.into_iter().next()).collect())
        } else {
            KeyValues::Tuples(rows)
        })
    }

    /// The current row of every identity that has one.
    pub fn current_set(&self) -> Result<Vec<Snapshot>, ConfigError> {
        Ok(self.configs.store().current_set(self.name(), self.schema.key_fields())?)
    }

    /// Every stored row, newest first.
    pub fn history(&self) -> Result<Vec<Snapshot>, ConfigError> {
        Ok(self.configs.store().history(self.name())?)
    }

    /// Every stored row, newest first, flagged when it is the current row of its identity.
    pub fn with_active_flag(&self) -> Result<Vec<ActiveRow>, ConfigError> {
        let current: Vec<Option<u64>> = self.current_set()?.into_iter().map(|row| row.id).collect();
        Ok(self
            .history()?
            .into_iter()
            .map(|snapshot| {
                let is_active = current.contains(&snapshot.id);
                ActiveRow { snapshot, is_active }
            })
            .collect())
    }

    pub fn count(&self) -> Result<usize, ConfigError> {
        Ok(self.configs.store().count(self.name())?)
    }
}
