use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::{CatalogItem, ItemKey};

/// One entry of a cross-reference list.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceSlot {
    /// The referenced item was cached; the renderer picks a label from it.
    Resolved(Arc<CatalogItem>),
    /// Not cached yet; the raw URL is shown until resolution arrives.
    Unresolved(String),
    /// A list element that is not a URL, shown as-is.
    Literal(Value),
}

impl ReferenceSlot {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ReferenceSlot::Resolved(_))
    }

    pub fn label(&self) -> String {
        match self {
            ReferenceSlot::Resolved(item) => item.display_name().to_string(),
            ReferenceSlot::Unresolved(url) => url.clone(),
            ReferenceSlot::Literal(Value::String(s)) => s.clone(),
            ReferenceSlot::Literal(other) => other.to_string(),
        }
    }
}

/// A projected field value.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Plain(Value),
    References(Vec<ReferenceSlot>),
}

impl DisplayValue {
    pub fn render(&self) -> String {
        match self {
            DisplayValue::Plain(Value::String(s)) => s.clone(),
            DisplayValue::Plain(other) => other.to_string(),
            DisplayValue::References(slots) => slots
                .iter()
                .map(ReferenceSlot::label)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// The currently displayed view. Replaced wholesale on every navigation.
///
/// `generation` increases with each replacement so that late patches from an
/// older view can be recognised and discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub generation: u64,
    pub subject: Option<ItemKey>,
    pub fields: IndexMap<String, DisplayValue>,
    pub visible: bool,
}

impl SelectionState {
    /// Replace the slot at `index` of the reference list under `label`.
    ///
    /// Returns `false` when the field or slot does not exist.
    pub fn patch_slot(&mut self, label: &str, index: usize, item: Arc<CatalogItem>) -> bool {
        match self.fields.get_mut(label) {
            Some(DisplayValue::References(slots)) => match slots.get_mut(index) {
                Some(slot) => {
                    *slot = ReferenceSlot::Resolved(item);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Replace a plain field value, used by views that fill in counts late.
    pub fn patch_value(&mut self, label: &str, value: Value) -> bool {
        match self.fields.get_mut(label) {
            Some(slot) => {
                *slot = DisplayValue::Plain(value);
                true
            }
            None => false,
        }
    }
}
