mod fetcher;
mod reqwest_transport;

pub use fetcher::{DedupFetcher, DEFAULT_REQUEST_TIMEOUT};
pub use reqwest_transport::ReqwestTransport;
