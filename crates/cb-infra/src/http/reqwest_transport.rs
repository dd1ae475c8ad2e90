use std::time::Duration;

use async_trait::async_trait;
use cb_core::ports::{HttpResponse, HttpTransportPort};
use cb_core::TransportError;
use tracing::trace;

/// [`HttpTransportPort`] backed by a shared `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Connection(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(err.to_string())
    }
}

#[async_trait]
impl HttpTransportPort for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        trace!(url = %url, status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}
