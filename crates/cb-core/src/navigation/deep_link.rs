use url::Url;

use crate::catalog::ItemKey;
use crate::error::CatalogError;

pub const TYPE_PARAM: &str = "type";
pub const ID_PARAM: &str = "id";

/// Read the `(type, id)` selection encoded in a location.
///
/// Returns `None` unless both parameters are present and non-empty.
pub fn selection_from_location(location: &str) -> Option<ItemKey> {
    let url = Url::parse(location).ok()?;
    let mut item_type = None;
    let mut id = None;

    for (name, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match name.as_ref() {
            TYPE_PARAM => item_type = Some(value.into_owned()),
            ID_PARAM => id = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(ItemKey::new(item_type?, id?))
}

/// Return `location` with `type` and `id` set to `key`, other parameters kept.
pub fn location_with_selection(location: &str, key: &ItemKey) -> Result<String, CatalogError> {
    let mut url = Url::parse(location).map_err(|_| CatalogError::InvalidUrl(location.to_string()))?;

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    for (param, value) in [(TYPE_PARAM, key.item_type.as_str()), (ID_PARAM, key.id.as_str())] {
        match pairs.iter_mut().find(|(name, _)| name == param) {
            Some(pair) => pair.1 = value.to_string(),
            None => pairs.push((param.to_string(), value.to_string())),
        }
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url.into())
}
