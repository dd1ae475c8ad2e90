//! Error taxonomy shared by the fetch, cache and resolution layers.

use thiserror::Error;

/// Failure of a single catalog fetch.
///
/// Every variant except [`FetchError::AlreadyPending`] collapses to "no data"
/// for the waiting caller; the duplicate variant is flow control only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request already pending")]
    AlreadyPending,

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("malformed JSON body: {0}")]
    Parse(String),
}

impl FetchError {
    /// Whether this is the de-duplication signal rather than a real failure.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, FetchError::AlreadyPending)
    }
}

/// Error raised by an HTTP transport before a status code is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("transport timed out")]
    Timeout,

    #[error("failed to read body: {0}")]
    Body(String),
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => FetchError::Timeout,
            other => FetchError::Transport(other.to_string()),
        }
    }
}

/// Error decoding a catalog document into domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no `url` field")]
    MissingUrl,

    #[error("cannot derive type/id from url: {0}")]
    InvalidUrl(String),

    #[error("malformed collection page: {0}")]
    MalformedPage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_timeout_maps_to_fetch_timeout() {
        let err: FetchError = TransportError::Timeout.into();
        assert_eq!(err, FetchError::Timeout);
    }

    #[test]
    fn test_connection_error_maps_to_transport() {
        let err: FetchError = TransportError::Connection("refused".into()).into();
        assert!(matches!(err, FetchError::Transport(msg) if msg.contains("refused")));
    }

    #[test]
    fn test_only_already_pending_is_duplicate() {
        assert!(FetchError::AlreadyPending.is_duplicate());
        assert!(!FetchError::Timeout.is_duplicate());
        assert!(!FetchError::Status(404).is_duplicate());
    }
}
