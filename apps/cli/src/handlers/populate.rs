use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use vconf::Platform;
use vconf::transfer::deserialize_json;

/// Imports the JSON document at `file` on behalf of `username`.
///
/// # Errors
/// Returns an error if either argument is missing, the file does not exist, or the import is
/// rejected.
pub fn populate(
    platform: &Platform,
    file: Option<&Path>,
    username: Option<&str>,
) -> Result<usize> {
    let Some(username) = username.filter(|u| !u.is_empty()) else {
        bail!("A valid username must be specified");
    };
    let Some(file) = file else {
        bail!("A file containing JSON must be specified");
    };
    if !file.exists() {
        bail!("File {} does not exist", file.display());
    }

    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    let created = deserialize_json(&platform.configs, reader, username, &platform.actors)?;
    Ok(created)
}
