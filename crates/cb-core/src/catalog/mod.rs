//! Catalog records, listings and the display-ready selection.

mod category;
mod item;
mod page;
mod selection;

pub use category::CategoryEntry;
pub use item::{CatalogItem, ItemKey, ID_FIELD, TYPE_FIELD, URL_FIELD};
pub use page::{CollectionPage, PageCursor, RootDocument};
pub use selection::{DisplayValue, ReferenceSlot, SelectionState};
