use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog root document URL (may be empty - this is a fact, not an error)
    pub api_root: String,

    /// Per-request timeout in milliseconds (0 when not configured)
    pub request_timeout_ms: u64,

    /// Localization table file (path info only, no existence check)
    pub locale_table_path: PathBuf,

    /// Location the navigation history starts from
    pub base_location: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            api_root: toml_value
                .get("catalog")
                .and_then(|c| c.get("api_root"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_ms: toml_value
                .get("catalog")
                .and_then(|c| c.get("request_timeout_ms"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            locale_table_path: PathBuf::from(
                toml_value
                    .get("locale")
                    .and_then(|l| l.get("table_path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            base_location: toml_value
                .get("history")
                .and_then(|h| h.get("base_location"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            api_root: String::new(),
            request_timeout_ms: 0,
            locale_table_path: PathBuf::new(),
            base_location: String::new(),
        }
    }
}
