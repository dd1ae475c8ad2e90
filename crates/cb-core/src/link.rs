//! URL rules of the catalog wire protocol.
//!
//! The upstream API hands out `http://` links but only serves `https://`, item
//! records identify themselves by their own `url`, and cross-references are
//! plain URL strings.

use std::borrow::Cow;

use crate::catalog::ItemKey;
use crate::error::CatalogError;

const INSECURE_PREFIX: &str = "http://";
const SECURE_PREFIX: &str = "https://";

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Rewrite an insecure-scheme URL to the secure scheme, keeping host and path.
///
/// Secure or scheme-less input is returned unchanged.
pub fn normalize_scheme(url: &str) -> Cow<'_, str> {
    if has_prefix_ignore_case(url, INSECURE_PREFIX) {
        Cow::Owned(format!("{}{}", SECURE_PREFIX, &url[INSECURE_PREFIX.len()..]))
    } else {
        Cow::Borrowed(url)
    }
}

/// Whether a field value should be treated as a cross-reference.
pub fn looks_like_reference(value: &str) -> bool {
    has_prefix_ignore_case(value, INSECURE_PREFIX) || has_prefix_ignore_case(value, SECURE_PREFIX)
}

/// Derive `(type, id)` from the last two non-empty path segments of `url`.
///
/// `.../people/2/` and `.../people/2` both yield `people/2`.
pub fn item_key_from_url(url: &str) -> Result<ItemKey, CatalogError> {
    let parsed = url::Url::parse(url).map_err(|_| CatalogError::InvalidUrl(url.to_string()))?;
    let mut segments = parsed
        .path_segments()
        .ok_or_else(|| CatalogError::InvalidUrl(url.to_string()))?
        .filter(|segment| !segment.is_empty())
        .rev();

    match (segments.next(), segments.next()) {
        (Some(id), Some(item_type)) => Ok(ItemKey::new(item_type, id)),
        _ => Err(CatalogError::InvalidUrl(url.to_string())),
    }
}

/// Canonical address of an item under the catalog root.
pub fn item_url(api_root: &str, key: &ItemKey) -> String {
    let root = api_root.trim_end_matches('/');
    format!("{}/{}/{}/", root, key.item_type, key.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insecure_scheme_is_rewritten() {
        assert_eq!(
            normalize_scheme("http://swapi.dev/api/people/1/"),
            "https://swapi.dev/api/people/1/"
        );
    }

    #[test]
    fn test_secure_scheme_passes_through() {
        let url = "https://swapi.dev/api/people/1/";
        assert!(matches!(normalize_scheme(url), Cow::Borrowed(u) if u == url));
    }

    #[test]
    fn test_scheme_match_is_case_insensitive() {
        assert_eq!(normalize_scheme("HTTP://host/a/"), "https://host/a/");
    }

    #[test]
    fn test_key_from_url_with_trailing_slash() {
        let key = item_key_from_url("https://swapi.dev/api/people/2/").unwrap();
        assert_eq!(key.item_type.as_str(), "people");
        assert_eq!(key.id.as_str(), "2");
    }

    #[test]
    fn test_key_from_url_without_trailing_slash() {
        let key = item_key_from_url("https://swapi.dev/api/planets/7").unwrap();
        assert_eq!(key, ItemKey::new("planets", "7"));
    }

    #[test]
    fn test_key_from_url_ignores_query() {
        let key = item_key_from_url("https://swapi.dev/api/films/3/?format=json").unwrap();
        assert_eq!(key, ItemKey::new("films", "3"));
    }

    #[test]
    fn test_key_from_url_rejects_short_paths() {
        assert!(item_key_from_url("https://swapi.dev/").is_err());
        assert!(item_key_from_url("not a url").is_err());
    }

    #[test]
    fn test_reference_detection() {
        assert!(looks_like_reference("https://swapi.dev/api/planets/1/"));
        assert!(looks_like_reference("http://swapi.dev/api/planets/1/"));
        assert!(!looks_like_reference("Tatooine"));
        assert!(!looks_like_reference("http"));
    }

    #[test]
    fn test_item_url_joins_root_and_key() {
        let key = ItemKey::new("people", "1");
        assert_eq!(
            item_url("https://swapi.dev/api/", &key),
            "https://swapi.dev/api/people/1/"
        );
        assert_eq!(
            item_url("https://swapi.dev/api", &key),
            "https://swapi.dev/api/people/1/"
        );
    }
}
