//! # cb-core
//!
//! Core domain models and business rules for the catalog browser.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! records and listings, link rules, the navigation state machine and the
//! port traits implemented by `cb-infra`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod link;
pub mod locale;
pub mod navigation;
pub mod ports;

// Re-export commonly used types at the crate root
pub use catalog::{
    CatalogItem, CategoryEntry, CollectionPage, DisplayValue, ItemKey, PageCursor, ReferenceSlot,
    RootDocument, SelectionState,
};
pub use config::AppConfig;
pub use error::{CatalogError, FetchError, TransportError};
pub use ids::{ItemId, ItemType};
pub use locale::LocaleTable;
