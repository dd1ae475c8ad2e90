use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Catalog collection key, e.g. `people` or `planets`.
///
/// Top-level categories are keyed by the same value, so a category id and
/// the type of the items it lists are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemType(String);

/// Identifier of an item inside its collection (the last path segment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl_id!(ItemType, ItemId);
