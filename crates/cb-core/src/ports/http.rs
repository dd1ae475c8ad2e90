use crate::error::TransportError;

/// Raw response of a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Plain HTTP GET. Scheme correction, de-duplication and timeouts live above this port.
#[async_trait::async_trait]
pub trait HttpTransportPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}
