//! In-memory object cache keyed by `(type, id)`.
//!
//! The catalog is small and static, so entries live for the whole session
//! and are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use cb_core::{CatalogError, CatalogItem, ItemKey};
use serde_json::Value;
use tracing::trace;

#[derive(Default)]
pub struct ObjectCache {
    entries: RwLock<HashMap<ItemKey, Arc<CatalogItem>>>,
}

impl ObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &ItemKey) -> Option<Arc<CatalogItem>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Look up the item a cross-reference URL points at.
    ///
    /// URLs that do not name an item are a miss.
    pub fn lookup_url(&self, url: &str) -> Option<Arc<CatalogItem>> {
        let key = ItemKey::from_url(url).ok()?;
        self.lookup(&key)
    }

    /// Store `item`, replacing any entry with the same key.
    pub fn insert(&self, item: CatalogItem) -> Arc<CatalogItem> {
        let item = Arc::new(item);
        let previous = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item.key().clone(), Arc::clone(&item));
        trace!(key = %item.key(), replaced = previous.is_some(), "item cached");
        item
    }

    /// Tag a raw record with `_type`/`_id` and store it.
    pub fn insert_value(&self, value: Value) -> Result<Arc<CatalogItem>, CatalogError> {
        Ok(self.insert(CatalogItem::from_value(value)?))
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
