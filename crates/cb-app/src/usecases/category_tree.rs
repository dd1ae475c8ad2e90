//! Top-level categories and their lazily loaded, paginated listings.

use std::sync::Arc;

use cb_core::ports::FetchPort;
use cb_core::{CategoryEntry, CollectionPage, ItemType, LocaleTable, PageCursor, RootDocument};
use cb_infra::ObjectCache;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::render::RenderStore;

/// What an [`CategoryTree::expand`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The category was already loaded; only its visibility flipped.
    Toggled { expanded: bool },
    /// A page was fetched and appended.
    Loaded { cursor: PageCursor, added: usize },
}

pub struct CategoryTree {
    fetcher: Arc<dyn FetchPort>,
    cache: Arc<ObjectCache>,
    store: Arc<RenderStore>,
    locale: Arc<LocaleTable>,
    root_url: String,
}

impl CategoryTree {
    pub fn new(
        fetcher: Arc<dyn FetchPort>,
        cache: Arc<ObjectCache>,
        store: Arc<RenderStore>,
        locale: Arc<LocaleTable>,
        root_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            store,
            locale,
            root_url: root_url.into(),
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Populate the category list from the catalog root, in document order.
    ///
    /// Categories are created once per session; a second call returns the
    /// existing count without fetching.
    pub async fn load_root(&self) -> Result<usize, AppError> {
        let existing = self.store.snapshot().categories.len();
        if existing > 0 {
            debug!(categories = existing, "root already loaded");
            return Ok(existing);
        }

        let root = RootDocument::from_value(self.fetcher.fetch_json(&self.root_url).await?)?;
        let entries: Vec<CategoryEntry> = root
            .categories
            .into_iter()
            .map(|(id, url)| {
                let label = self.locale.label(id.as_str()).to_string();
                CategoryEntry::new(id, label, url)
            })
            .collect();

        let count = entries.len();
        self.store.set_categories(entries);
        info!(categories = count, "catalog root loaded");
        Ok(count)
    }

    /// Load `page_url` into `category`, or toggle it when already loaded.
    ///
    /// A primary trigger on a loaded category only flips `expanded`. Otherwise
    /// the page is fetched, its items cached and appended, and the cursors
    /// recorded. The first successful primary load also expands the category.
    /// On failure the category is left untouched.
    pub async fn expand(
        &self,
        category: &ItemType,
        page_url: &str,
        primary: bool,
    ) -> Result<ExpandOutcome, AppError> {
        let entry = self
            .store
            .category(category)
            .ok_or_else(|| AppError::UnknownCategory(category.clone()))?;

        if primary && entry.is_loaded() {
            let expanded = self
                .store
                .update_category(category, |entry| {
                    entry.expanded = !entry.expanded;
                    entry.expanded
                })
                .ok_or_else(|| AppError::UnknownCategory(category.clone()))?;
            debug!(category = %category, expanded, "category toggled");
            return Ok(ExpandOutcome::Toggled { expanded });
        }

        let page = CollectionPage::from_value(self.fetcher.fetch_json(page_url).await?)?;
        let items: Vec<_> = page
            .results
            .into_iter()
            .filter_map(|value| match self.cache.insert_value(value) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(category = %category, error = %err, "skipping malformed listing item");
                    None
                }
            })
            .collect();

        let added = items.len();
        let cursor = page.cursor;
        self.store
            .update_category(category, |entry| {
                let first_load = !entry.is_loaded();
                entry.append_page(cursor.clone(), items);
                if primary && first_load {
                    entry.expanded = true;
                }
            })
            .ok_or_else(|| AppError::UnknownCategory(category.clone()))?;

        debug!(
            category = %category,
            added,
            count = cursor.count,
            has_next = cursor.next_url.is_some(),
            "category page loaded"
        );
        Ok(ExpandOutcome::Loaded { cursor, added })
    }

    /// Primary trigger on `category`: first load from its collection URL,
    /// afterwards a visibility toggle.
    pub async fn toggle(&self, category: &ItemType) -> Result<ExpandOutcome, AppError> {
        let entry = self
            .store
            .category(category)
            .ok_or_else(|| AppError::UnknownCategory(category.clone()))?;
        self.expand(category, &entry.collection_url, true).await
    }

    /// Append the page behind the recorded `next` cursor.
    ///
    /// Returns `None` when the category was never loaded or has no next page.
    pub async fn load_next_page(
        &self,
        category: &ItemType,
    ) -> Result<Option<ExpandOutcome>, AppError> {
        let entry = self
            .store
            .category(category)
            .ok_or_else(|| AppError::UnknownCategory(category.clone()))?;

        match entry.next_url() {
            Some(next) => Ok(Some(self.expand(category, next, false).await?)),
            None => {
                debug!(category = %category, "no further pages");
                Ok(None)
            }
        }
    }
}
