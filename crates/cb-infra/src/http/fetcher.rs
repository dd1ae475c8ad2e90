//! De-duplicating JSON fetcher.
//!
//! At most one request per normalized URL is in flight. A second caller for
//! the same URL is turned away with [`FetchError::AlreadyPending`] instead of
//! being queued; interest in the eventual result is registered elsewhere.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cb_core::link::normalize_scheme;
use cb_core::ports::{FetchPort, HttpTransportPort};
use cb_core::FetchError;
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

type Registry = Arc<Mutex<HashMap<String, InFlight>>>;

struct InFlight {
    started_at: Instant,
}

/// Removes the registry entry when the request ends, however it ends.
struct InFlightGuard {
    registry: Registry,
    url: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = registry.remove(&self.url) {
            debug!(
                url = %self.url,
                elapsed_ms = entry.started_at.elapsed().as_millis() as u64,
                "request slot released"
            );
        }
    }
}

pub struct DedupFetcher {
    transport: Arc<dyn HttpTransportPort>,
    timeout: Duration,
    in_flight: Registry,
}

impl DedupFetcher {
    pub fn new(transport: Arc<dyn HttpTransportPort>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn in_flight_count(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_register(&self, url: &str) -> Option<InFlightGuard> {
        let mut registry = self.registry();
        if registry.contains_key(url) {
            return None;
        }
        registry.insert(
            url.to_string(),
            InFlight {
                started_at: Instant::now(),
            },
        );
        Some(InFlightGuard {
            registry: Arc::clone(&self.in_flight),
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl FetchPort for DedupFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let url = normalize_scheme(url).into_owned();

        let Some(_slot) = self.try_register(&url) else {
            debug!(url = %url, "duplicate request rejected");
            return Err(FetchError::AlreadyPending);
        };

        debug!(url = %url, "fetch started");
        let response = match tokio::time::timeout(self.timeout, self.transport.get(&url)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                warn!(url = %url, error = %err, "fetch failed");
                return Err(err.into());
            }
            Err(_) => {
                warn!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "fetch timed out");
                return Err(FetchError::Timeout);
            }
        };

        if response.status != 200 {
            warn!(url = %url, status = response.status, "unexpected status");
            return Err(FetchError::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(|err| {
            warn!(url = %url, error = %err, "response body is not valid JSON");
            FetchError::Parse(err.to_string())
        })
    }
}
