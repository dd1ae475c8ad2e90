//! Infrastructure adapters for the catalog browser.

pub mod cache;
pub mod history;
pub mod http;
pub mod locale;

pub use cache::ObjectCache;
pub use history::InMemoryHistory;
pub use http::{DedupFetcher, ReqwestTransport};
pub use locale::load_locale_table;
