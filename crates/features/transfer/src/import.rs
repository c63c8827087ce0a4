use crate::document::{Document, Documents};
use crate::error::TransferError;
use std::io::Read;
use tracing::{debug, info, instrument};
use vconf_kernel::security::ActorDirectory;
use vconf_models::{ConfigModel, Configurations};

/// Imports configuration rows from a JSON document, attributing them to `username`.
///
/// Purely additive: a row is appended only when it differs from the current snapshot of its
/// identity, and nothing is ever removed. Every document is resolved and every row validated
/// before the first write. Returns the number of rows created.
///
/// # Errors
/// * [`TransferError::MalformedInput`] when the input is not a valid document.
/// * [`TransferError::UnknownSchema`] when a document names an unregistered schema.
/// * [`TransferError::ReferentialError`] when `username` is not a known actor.
#[instrument(skip_all, fields(username = %username))]
pub fn deserialize_json<R: Read>(
    configs: &Configurations,
    reader: R,
    username: &str,
    actors: &dyn ActorDirectory,
) -> Result<usize, TransferError> {
    let documents: Documents = serde_json::from_reader(reader).map_err(|e| {
        TransferError::MalformedInput {
            message: format!("JSON parse error: {e}").into(),
            context: None,
        }
    })?;
    let documents = documents.into_vec();

    let models = documents
        .iter()
        .map(|document| configs.model(&document.model).map_err(TransferError::from_model))
        .collect::<Result<Vec<_>, _>>()?;

    let Some(actor) = actors.by_username(username) else {
        return Err(TransferError::ReferentialError {
            message: format!("Actor matching query does not exist: '{username}'").into(),
            context: None,
        });
    };

    for (model, document) in models.iter().zip(&documents) {
        validate(model, document)?;
    }

    let mut created = 0;
    for (model, document) in models.iter().zip(&documents) {
        created += apply(model, document, &actor.username)?;
    }

    info!(created, documents = documents.len(), "Configuration import finished");
    Ok(created)
}

fn validate(model: &ConfigModel, document: &Document) -> Result<(), TransferError> {
    for (index, row) in document.data.iter().enumerate() {
        model.candidate(row).map_err(|e| TransferError::Config {
            source: e,
            context: Some(format!("{} row {index}", document.model).into()),
        })?;
    }
    Ok(())
}

fn apply(model: &ConfigModel, document: &Document, username: &str) -> Result<usize, TransferError> {
    let mut created = 0;
    for row in &document.data {
        if model.equal_to_current(row)? {
            debug!(schema = model.name(), "Row unchanged, skipped");
            continue;
        }
        model.save_fields(row, Some(username))?;
        created += 1;
    }
    Ok(created)
}
