//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - ✅ Turn the raw [`AppConfig`] into concrete [`Settings`] (defaults live here)
//! - ✅ Create infra implementations (HTTP transport, fetcher, history, locale)
//! - ✅ Inject them into a [`CatalogSession`]
//!
//! ## Prohibited
//!
//! ❌ **No business logic**: what to fetch and when is decided by the use cases.
//!
//! > **This is the only place allowed to depend on cb-infra and cb-app simultaneously.**

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cb_app::{CatalogDeps, CatalogSession};
use cb_core::config::AppConfig;
use cb_core::ports::{FetchPort, HistoryPort, HttpTransportPort};
use cb_core::LocaleTable;
use cb_infra::http::DEFAULT_REQUEST_TIMEOUT;
use cb_infra::{load_locale_table, DedupFetcher, InMemoryHistory, ReqwestTransport};
use tracing::{debug, info};

pub const DEFAULT_API_ROOT: &str = "https://swapi.dev/api/";
pub const DEFAULT_BASE_LOCATION: &str = "https://catalog.local/";

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP transport initialization failed: {0}")]
    TransportInit(String),

    #[error("Locale table initialization failed: {0}")]
    LocaleInit(String),
}

/// Effective runtime settings, with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_root: String,
    pub request_timeout: Duration,
    pub locale_table_path: Option<PathBuf>,
    pub base_location: String,
}

/// Apply defaults to the loaded configuration.
///
/// Empty strings and a zero timeout mean "not configured".
pub fn resolve_settings(config: &AppConfig) -> Settings {
    fn or_default(value: &str, default: &str) -> String {
        if value.trim().is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    }

    Settings {
        api_root: or_default(&config.api_root, DEFAULT_API_ROOT),
        request_timeout: match config.request_timeout_ms {
            0 => DEFAULT_REQUEST_TIMEOUT,
            ms => Duration::from_millis(ms),
        },
        locale_table_path: (!config.locale_table_path.as_os_str().is_empty())
            .then(|| config.locale_table_path.clone()),
        base_location: or_default(&config.base_location, DEFAULT_BASE_LOCATION),
    }
}

async fn create_locale_table(settings: &Settings) -> WiringResult<LocaleTable> {
    match &settings.locale_table_path {
        Some(path) => load_locale_table(path)
            .await
            .map_err(|e| WiringError::LocaleInit(format!("{e:#}"))),
        None => {
            debug!("no locale table configured, keys are shown raw");
            Ok(LocaleTable::default())
        }
    }
}

/// Build a session whose history starts at `initial_location`.
///
/// Returns the concrete history alongside the session so that callers can
/// drive back/forward.
pub async fn wire_session(
    settings: &Settings,
    initial_location: String,
) -> WiringResult<(CatalogSession, Arc<InMemoryHistory>)> {
    let transport = ReqwestTransport::new(settings.request_timeout)
        .map_err(|e| WiringError::TransportInit(e.to_string()))?;
    let fetcher: Arc<dyn FetchPort> = Arc::new(DedupFetcher::new(
        Arc::new(transport) as Arc<dyn HttpTransportPort>,
        settings.request_timeout,
    ));
    let history = Arc::new(InMemoryHistory::new(initial_location));
    let locale = Arc::new(create_locale_table(settings).await?);

    info!(
        api_root = %settings.api_root,
        timeout_ms = settings.request_timeout.as_millis() as u64,
        locale_entries = locale.len(),
        "session wired"
    );

    let session = CatalogSession::new(CatalogDeps {
        fetcher,
        history: Arc::clone(&history) as Arc<dyn HistoryPort>,
        locale,
        api_root: settings.api_root.clone(),
    });

    Ok((session, history))
}
