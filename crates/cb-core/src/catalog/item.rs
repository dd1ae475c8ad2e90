use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::CatalogError;
use crate::ids::{ItemId, ItemType};
use crate::link::item_key_from_url;

/// Derived field holding the collection name.
pub const TYPE_FIELD: &str = "_type";
/// Derived field holding the item identifier.
pub const ID_FIELD: &str = "_id";
/// Self-referencing address every item record carries.
pub const URL_FIELD: &str = "url";

/// Cache key of an item: `(type, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub item_type: ItemType,
    pub id: ItemId,
}

impl ItemKey {
    pub fn new(item_type: impl Into<ItemType>, id: impl Into<ItemId>) -> Self {
        Self {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    pub fn from_url(url: &str) -> Result<Self, CatalogError> {
        item_key_from_url(url)
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.item_type, self.id)
    }
}

/// An item record as returned by the catalog, tagged with `_type` and `_id`.
///
/// Tagging happens once, when the record is decoded for caching; the record
/// is never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    key: ItemKey,
    fields: Map<String, Value>,
}

impl CatalogItem {
    /// Decode a raw record and attach the derived `_type`/`_id` fields.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(mut fields) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let url = fields
            .get(URL_FIELD)
            .and_then(Value::as_str)
            .ok_or(CatalogError::MissingUrl)?;
        let key = ItemKey::from_url(url)?;

        fields.insert(
            TYPE_FIELD.to_string(),
            Value::String(key.item_type.to_string()),
        );
        fields.insert(ID_FIELD.to_string(), Value::String(key.id.to_string()));

        Ok(Self { key, fields })
    }

    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn item_type(&self) -> &ItemType {
        &self.key.item_type
    }

    pub fn id(&self) -> &ItemId {
        &self.key.id
    }

    pub fn url(&self) -> &str {
        self.fields
            .get(URL_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All fields in wire order, derived fields included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Human-readable label: `name`, then `title`, then the item url.
    pub fn display_name(&self) -> &str {
        ["name", "title"]
            .iter()
            .find_map(|field| self.fields.get(*field).and_then(Value::as_str))
            .unwrap_or_else(|| self.url())
    }
}

impl Serialize for CatalogItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
