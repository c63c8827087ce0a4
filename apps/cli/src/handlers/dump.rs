use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use vconf::Platform;
use vconf::transfer::write_dump;

/// Writes the current set of `schemas` (every schema when empty) to `file`.
///
/// # Errors
/// Returns an error if the file cannot be created or a schema is unknown.
pub fn dump(platform: &Platform, file: &Path, schemas: &[String]) -> Result<usize> {
    let out = File::create(file).with_context(|| format!("Failed to create {}", file.display()))?;
    let rows = write_dump(&platform.configs, schemas, BufWriter::new(out))?;
    Ok(rows)
}
