use cb_core::{CatalogError, FetchError, ItemType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown category: {0}")]
    UnknownCategory(ItemType),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
