use serde_json::Value;

use crate::error::FetchError;

/// De-duplicated, timeout-bounded JSON fetch.
#[async_trait::async_trait]
pub trait FetchPort: Send + Sync {
    /// Fetch `url` and decode the body.
    ///
    /// Fails immediately with [`FetchError::AlreadyPending`] when the same
    /// normalized URL is already in flight.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}
