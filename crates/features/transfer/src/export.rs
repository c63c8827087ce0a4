use crate::document::Document;
use crate::error::TransferError;
use serde_json::{Map, Value};
use std::io::Write;
use tracing::{info, instrument};
use vconf_domain::snapshot::ENABLED;
use vconf_domain::{Schema, Snapshot};
use vconf_models::Configurations;

/// Builds one import document per schema from its current set.
///
/// Rows carry `enabled` and every field except many-to-many ones; the store-assigned
/// `id`, `created_at` and `created_by` are left out. An empty `schemas` exports every
/// registered schema, in name order.
///
/// # Errors
/// Fails on an unknown schema name or a store failure.
pub fn dump<S: AsRef<str>>(
    configs: &Configurations,
    schemas: &[S],
) -> Result<Vec<Document>, TransferError> {
    let names: Vec<String> = if schemas.is_empty() {
        configs.registry().names()
    } else {
        schemas.iter().map(|s| s.as_ref().to_owned()).collect()
    };

    names
        .iter()
        .map(|name| {
            let model = configs.model(name).map_err(TransferError::from_model)?;
            let data = model
                .current_set()?
                .iter()
                .map(|row| exported_fields(model.schema(), row))
                .collect();
            Ok(Document { model: name.clone(), data })
        })
        .collect()
}

/// [`dump`] written as pretty JSON to `writer`. Returns the number of rows written.
///
/// # Errors
/// Fails like [`dump`], or when writing fails.
#[instrument(skip_all)]
pub fn write_dump<S: AsRef<str>, W: Write>(
    configs: &Configurations,
    schemas: &[S],
    mut writer: W,
) -> Result<usize, TransferError> {
    let documents = dump(configs, schemas)?;
    serde_json::to_writer_pretty(&mut writer, &documents)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    let rows = documents.iter().map(|d| d.data.len()).sum();
    info!(rows, documents = documents.len(), "Configuration dump written");
    Ok(rows)
}

fn exported_fields(schema: &Schema, row: &Snapshot) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(ENABLED.to_owned(), Value::Bool(row.enabled));
    for field in schema.fields().iter().filter(|f| !f.kind().is_many_to_many()) {
        let value = row.field(field.name()).map_or(Value::Null, |v| v.to_json());
        fields.insert(field.name().to_owned(), value);
    }
    fields
}
