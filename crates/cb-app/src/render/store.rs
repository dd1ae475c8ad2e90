use std::sync::Arc;

use cb_core::{CatalogItem, CategoryEntry, DisplayValue, ItemKey, ItemType, SelectionState};
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::watch;
use tracing::trace;

/// Everything a renderer needs: the category tree and the current selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub categories: Vec<CategoryEntry>,
    pub selection: SelectionState,
}

impl RenderSnapshot {
    pub fn selected(&self) -> bool {
        self.selection.visible
    }

    pub fn category(&self, id: &ItemType) -> Option<&CategoryEntry> {
        self.categories.iter().find(|entry| &entry.id == id)
    }
}

pub struct RenderStore {
    tx: watch::Sender<RenderSnapshot>,
}

impl Default for RenderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RenderSnapshot::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.tx.borrow().clone()
    }

    pub fn category(&self, id: &ItemType) -> Option<CategoryEntry> {
        self.tx.borrow().category(id).cloned()
    }

    pub fn set_categories(&self, categories: Vec<CategoryEntry>) {
        self.tx.send_modify(|snapshot| snapshot.categories = categories);
    }

    /// Mutate one category in place and publish. Returns `None` if it does not exist.
    pub fn update_category<R>(
        &self,
        id: &ItemType,
        update: impl FnOnce(&mut CategoryEntry) -> R,
    ) -> Option<R> {
        let mut result = None;
        self.tx.send_if_modified(|snapshot| {
            match snapshot.categories.iter_mut().find(|entry| &entry.id == id) {
                Some(entry) => {
                    result = Some(update(entry));
                    true
                }
                None => false,
            }
        });
        result
    }

    /// Replace the selection with a visible view and return its generation.
    pub fn show_selection(
        &self,
        subject: Option<ItemKey>,
        fields: IndexMap<String, DisplayValue>,
    ) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|snapshot| {
            generation = snapshot.selection.generation + 1;
            snapshot.selection = SelectionState {
                generation,
                subject,
                fields,
                visible: true,
            };
        });
        trace!(generation, "selection replaced");
        generation
    }

    /// Fill a reference slot of the selection, if it is still generation `generation`.
    pub fn patch_reference(
        &self,
        generation: u64,
        label: &str,
        index: usize,
        item: Arc<CatalogItem>,
    ) -> bool {
        self.tx.send_if_modified(|snapshot| {
            snapshot.selection.generation == generation
                && snapshot.selection.patch_slot(label, index, item)
        })
    }

    /// Replace a plain selection value, if it is still generation `generation`.
    pub fn patch_value(&self, generation: u64, label: &str, value: Value) -> bool {
        self.tx.send_if_modified(|snapshot| {
            snapshot.selection.generation == generation
                && snapshot.selection.patch_value(label, value)
        })
    }
}
