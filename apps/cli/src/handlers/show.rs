use anyhow::Result;
use std::io::Write;
use vconf::Platform;
use vconf::domain::FieldValue;

/// Prints the current snapshot of `schema` for `keys` as pretty JSON.
///
/// # Errors
/// Returns an error for an unknown schema, a wrong number of keys, or a failed write.
pub fn show<W: Write>(
    platform: &Platform,
    schema: &str,
    keys: &[String],
    mut out: W,
) -> Result<()> {
    let model = platform.configs.model(schema)?;
    let keys: Vec<FieldValue> = keys.iter().map(|k| FieldValue::from(k.as_str())).collect();

    let current = model.current(&keys)?;
    serde_json::to_writer_pretty(&mut out, &current)?;
    writeln!(out)?;
    Ok(())
}
