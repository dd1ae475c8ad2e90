//! Per-category item counts, shown in the selection area.

use std::sync::Arc;

use cb_core::DisplayValue;
use futures::future::join_all;
use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::category_tree::{CategoryTree, ExpandOutcome};
use crate::render::RenderStore;

/// Placeholder shown until a category's first page reports its count.
pub const UNKNOWN_COUNT: &str = "?";

pub struct LoadStatistics {
    tree: Arc<CategoryTree>,
    store: Arc<RenderStore>,
}

impl LoadStatistics {
    pub fn new(tree: Arc<CategoryTree>, store: Arc<RenderStore>) -> Self {
        Self { tree, store }
    }

    /// Publish the statistics view and fill in unknown counts as pages arrive.
    ///
    /// Loaded categories show their recorded count at once. The others show
    /// [`UNKNOWN_COUNT`] and get a non-primary load of their first page; a
    /// failed load keeps the placeholder. Returns the selection generation.
    pub async fn show(&self) -> u64 {
        let categories = self.store.snapshot().categories;

        let fields: IndexMap<String, DisplayValue> = categories
            .iter()
            .map(|entry| {
                let count = match &entry.page {
                    Some(page) => json!(page.count),
                    None => Value::String(UNKNOWN_COUNT.to_string()),
                };
                (entry.label.clone(), DisplayValue::Plain(count))
            })
            .collect();
        let generation = self.store.show_selection(None, fields);

        let loads = categories
            .into_iter()
            .filter(|entry| entry.page.is_none())
            .map(|entry| async move {
                let outcome = self
                    .tree
                    .expand(&entry.id, &entry.collection_url, false)
                    .await;
                (entry, outcome)
            });

        for (entry, outcome) in join_all(loads).await {
            match outcome {
                Ok(ExpandOutcome::Loaded { cursor, .. }) => {
                    self.store
                        .patch_value(generation, &entry.label, json!(cursor.count));
                }
                Ok(ExpandOutcome::Toggled { .. }) => {}
                Err(err) => {
                    warn!(category = %entry.id, error = %err, "count unavailable");
                }
            }
        }

        debug!(generation, "statistics settled");
        generation
    }
}
