use std::sync::Arc;

use super::{CatalogItem, PageCursor};
use crate::ids::ItemType;

/// A top-level category and its lazily loaded listing.
///
/// Created once per root entry and mutated in place as pages arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEntry {
    pub id: ItemType,
    pub label: String,
    pub collection_url: String,
    pub expanded: bool,
    pub page: Option<PageCursor>,
    pub items: Option<Vec<Arc<CatalogItem>>>,
}

impl CategoryEntry {
    pub fn new(id: ItemType, label: impl Into<String>, collection_url: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            collection_url: collection_url.into(),
            expanded: false,
            page: None,
            items: None,
        }
    }

    /// Whether at least one page has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }

    /// Record the cursor of a freshly loaded page and append its items.
    ///
    /// The first page creates the sequence; later pages extend it.
    pub fn append_page(&mut self, cursor: PageCursor, items: Vec<Arc<CatalogItem>>) {
        self.page = Some(cursor);
        self.items.get_or_insert_with(Vec::new).extend(items);
    }

    pub fn next_url(&self) -> Option<&str> {
        self.page.as_ref().and_then(|page| page.next_url.as_deref())
    }

    pub fn loaded_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: u32) -> Arc<CatalogItem> {
        Arc::new(
            CatalogItem::from_value(json!({
                "url": format!("https://swapi.dev/api/people/{id}/")
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_new_category_is_collapsed_and_unloaded() {
        let entry = CategoryEntry::new("people".into(), "People", "https://swapi.dev/api/people/");
        assert!(!entry.expanded);
        assert!(!entry.is_loaded());
        assert_eq!(entry.page, None);
    }

    #[test]
    fn test_append_page_extends_in_order() {
        let mut entry = CategoryEntry::new("people".into(), "people", "https://swapi.dev/api/people/");
        entry.append_page(
            PageCursor {
                count: 3,
                next_url: Some("https://swapi.dev/api/people/?page=2".into()),
                prev_url: None,
            },
            vec![item(1), item(2)],
        );
        entry.append_page(
            PageCursor {
                count: 3,
                next_url: None,
                prev_url: Some("https://swapi.dev/api/people/?page=1".into()),
            },
            vec![item(3)],
        );

        let ids: Vec<&str> = entry
            .items
            .as_ref()
            .unwrap()
            .iter()
            .map(|i| i.id().as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(entry.next_url(), None);
        assert_eq!(entry.loaded_count(), 3);
    }

    #[test]
    fn test_empty_first_page_still_marks_loaded() {
        let mut entry = CategoryEntry::new("people".into(), "people", "https://swapi.dev/api/people/");
        entry.append_page(PageCursor::default(), Vec::new());
        assert!(entry.is_loaded());
        assert_eq!(entry.loaded_count(), 0);
    }
}
