//! Loads a localization table from a flat JSON or TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use cb_core::LocaleTable;
use tokio::fs;
use tracing::info;

/// Read `path` as a `key → label` table. `.toml` files are parsed as TOML,
/// everything else as JSON.
pub async fn load_locale_table(path: &Path) -> Result<LocaleTable> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("read locale table failed: {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let table: LocaleTable = if is_toml {
        toml::from_str(&content)
            .with_context(|| format!("parse locale table as TOML failed: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("parse locale table as JSON failed: {}", path.display()))?
    };

    info!(path = %path.display(), entries = table.len(), "locale table loaded");
    Ok(table)
}
