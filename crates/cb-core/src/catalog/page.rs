use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;
use crate::ids::ItemType;

/// Pagination cursors of a collection, recorded verbatim from the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub count: u64,
    pub next_url: Option<String>,
    pub prev_url: Option<String>,
}

/// One page of a collection endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPage {
    pub cursor: PageCursor,
    pub results: Vec<Value>,
}

#[derive(Deserialize)]
struct WirePage {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
    results: Vec<Value>,
}

impl CollectionPage {
    /// Decode `{count, next, previous, results}`.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let wire: WirePage = serde_json::from_value(value)
            .map_err(|err| CatalogError::MalformedPage(err.to_string()))?;

        Ok(Self {
            cursor: PageCursor {
                count: wire.count,
                next_url: wire.next,
                prev_url: wire.previous,
            },
            results: wire.results,
        })
    }
}

/// The catalog root: category key → collection URL, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootDocument {
    pub categories: Vec<(ItemType, String)>,
}

impl RootDocument {
    /// Decode the root mapping. Entries whose value is not a string are skipped.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let categories = map
            .into_iter()
            .filter_map(|(key, url)| match url {
                Value::String(url) => Some((ItemType::from(key), url)),
                _ => None,
            })
            .collect();

        Ok(Self { categories })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_page_records_cursors_verbatim() {
        let page = CollectionPage::from_value(json!({
            "count": 82,
            "next": "http://swapi.dev/api/people/?page=2",
            "previous": null,
            "results": [{"url": "https://swapi.dev/api/people/1/"}]
        }))
        .unwrap();

        assert_eq!(page.cursor.count, 82);
        assert_eq!(
            page.cursor.next_url.as_deref(),
            Some("http://swapi.dev/api/people/?page=2")
        );
        assert_eq!(page.cursor.prev_url, None);
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_collection_page_requires_results() {
        let err = CollectionPage::from_value(json!({"count": 1})).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedPage(_)));
    }

    #[test]
    fn test_root_document_keeps_declared_order() {
        let root = RootDocument::from_value(json!({
            "people": "https://swapi.dev/api/people/",
            "planets": "https://swapi.dev/api/planets/",
            "films": "https://swapi.dev/api/films/"
        }))
        .unwrap();

        let keys: Vec<&str> = root.categories.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["people", "planets", "films"]);
    }

    #[test]
    fn test_root_document_skips_non_string_values() {
        let root = RootDocument::from_value(json!({
            "people": "https://swapi.dev/api/people/",
            "version": 2
        }))
        .unwrap();
        assert_eq!(root.categories.len(), 1);
    }
}
