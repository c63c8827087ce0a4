use anyhow::Result;
use std::io::Write;
use vconf::Platform;

/// Prints every row of `schema`, newest first. Current rows are marked with `*`.
///
/// # Errors
/// Returns an error for an unknown schema or a failed write.
pub fn history<W: Write>(platform: &Platform, schema: &str, mut out: W) -> Result<()> {
    let model = platform.configs.model(schema)?;
    let rows = model.with_active_flag()?;
    if rows.is_empty() {
        writeln!(out, "ℹ️ No stored versions of '{schema}'.")?;
        return Ok(());
    }

    for row in rows {
        let snapshot = &row.snapshot;
        let fields = snapshot
            .fields
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "{} #{} {} by {} enabled={} {fields}",
            if row.is_active { '*' } else { ' ' },
            snapshot.id.unwrap_or_default(),
            snapshot.created_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
            snapshot.created_by.as_deref().unwrap_or("-"),
            snapshot.enabled,
        )?;
    }
    Ok(())
}
