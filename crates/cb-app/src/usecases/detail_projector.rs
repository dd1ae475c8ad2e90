use std::sync::Arc;

use cb_core::catalog::{ID_FIELD, TYPE_FIELD, URL_FIELD};
use cb_core::link::looks_like_reference;
use cb_core::{CatalogItem, DisplayValue, LocaleTable, ReferenceSlot};
use cb_infra::ObjectCache;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::render::RenderStore;
use crate::resolution::PendingResolutionQueue;

/// A reference slot that showed a raw URL because its item was not cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSlot {
    pub label: String,
    pub index: usize,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub fields: IndexMap<String, DisplayValue>,
    pub unresolved: Vec<UnresolvedSlot>,
}

/// Turns item records into display-ready field maps.
pub struct DetailProjector {
    cache: Arc<ObjectCache>,
    queue: PendingResolutionQueue,
    store: Arc<RenderStore>,
    locale: Arc<LocaleTable>,
}

impl DetailProjector {
    pub fn new(
        cache: Arc<ObjectCache>,
        queue: PendingResolutionQueue,
        store: Arc<RenderStore>,
        locale: Arc<LocaleTable>,
    ) -> Self {
        Self {
            cache,
            queue,
            store,
            locale,
        }
    }

    /// Project `item` against the current cache contents.
    ///
    /// Derived fields are skipped, keys are translated, and cross-references
    /// are substituted with cached items where possible.
    pub fn project(&self, item: &CatalogItem) -> Projection {
        let mut projection = Projection::default();

        for (key, value) in item.fields() {
            if key == TYPE_FIELD || key == ID_FIELD {
                continue;
            }
            // Labels key both the fields and the slot patches and must stay
            // unique; a clashing translation falls back to the raw key.
            let label = match self.locale.label(key) {
                label if !projection.fields.contains_key(label) => label.to_string(),
                _ if !projection.fields.contains_key(key.as_str()) => key.clone(),
                _ => {
                    warn!(field = %key, "label already taken, field skipped");
                    continue;
                }
            };

            let display = match value {
                Value::String(url) if key != URL_FIELD && looks_like_reference(url) => {
                    let slot = self.reference_slot(&label, 0, url, &mut projection.unresolved);
                    DisplayValue::References(vec![slot])
                }
                Value::Array(elements) => DisplayValue::References(
                    elements
                        .iter()
                        .enumerate()
                        .map(|(index, element)| match element {
                            Value::String(url) if looks_like_reference(url) => {
                                self.reference_slot(&label, index, url, &mut projection.unresolved)
                            }
                            other => ReferenceSlot::Literal(other.clone()),
                        })
                        .collect(),
                ),
                other => DisplayValue::Plain(other.clone()),
            };

            projection.fields.insert(label, display);
        }

        projection
    }

    /// Project `item`, publish it as the visible selection and queue
    /// resolution of every unresolved slot. Returns the selection generation.
    pub fn present(&self, item: &CatalogItem) -> u64 {
        let Projection { fields, unresolved } = self.project(item);
        let generation = self.store.show_selection(Some(item.key().clone()), fields);
        debug!(
            key = %item.key(),
            generation,
            unresolved = unresolved.len(),
            "selection presented"
        );

        for slot in unresolved {
            let store = Arc::clone(&self.store);
            let url = slot.url.clone();
            self.queue.await_item(&url, move |resolved| {
                store.patch_reference(generation, &slot.label, slot.index, resolved);
            });
        }

        generation
    }

    fn reference_slot(
        &self,
        label: &str,
        index: usize,
        url: &str,
        unresolved: &mut Vec<UnresolvedSlot>,
    ) -> ReferenceSlot {
        match self.cache.lookup_url(url) {
            Some(item) => ReferenceSlot::Resolved(item),
            None => {
                unresolved.push(UnresolvedSlot {
                    label: label.to_string(),
                    index,
                    url: url.to_string(),
                });
                ReferenceSlot::Unresolved(url.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fetcher, StaticTransport};
    use serde_json::json;

    const TATOOINE: &str = "https://swapi.dev/api/planets/1/";
    const NEW_HOPE: &str = "https://swapi.dev/api/films/1/";
    const EMPIRE: &str = "https://swapi.dev/api/films/2/";

    struct Fixture {
        transport: Arc<StaticTransport>,
        cache: Arc<ObjectCache>,
        queue: PendingResolutionQueue,
        store: Arc<RenderStore>,
        projector: DetailProjector,
    }

    fn fixture(locale: LocaleTable) -> Fixture {
        let transport = StaticTransport::new();
        let cache = Arc::new(ObjectCache::new());
        let queue = PendingResolutionQueue::new(fetcher(&transport), Arc::clone(&cache));
        let store = Arc::new(RenderStore::new());
        let projector = DetailProjector::new(
            Arc::clone(&cache),
            queue.clone(),
            Arc::clone(&store),
            Arc::new(locale),
        );
        Fixture {
            transport,
            cache,
            queue,
            store,
            projector,
        }
    }

    fn luke() -> CatalogItem {
        CatalogItem::from_value(json!({
            "name": "Luke Skywalker",
            "height": "172",
            "homeworld": TATOOINE,
            "films": [NEW_HOPE, EMPIRE],
            "url": "https://swapi.dev/api/people/1/"
        }))
        .unwrap()
    }

    #[test]
    fn test_project_skips_derived_fields_and_keeps_self_url_plain() {
        let fx = fixture(LocaleTable::default());

        let projection = fx.projector.project(&luke());

        assert!(!projection.fields.contains_key("_type"));
        assert!(!projection.fields.contains_key("_id"));
        assert_eq!(
            projection.fields["url"],
            DisplayValue::Plain(json!("https://swapi.dev/api/people/1/"))
        );
        assert_eq!(
            projection.fields["height"],
            DisplayValue::Plain(json!("172"))
        );
    }

    #[test]
    fn test_project_substitutes_cached_references() {
        let fx = fixture(LocaleTable::default());
        let planet = fx
            .cache
            .insert_value(json!({"name": "Tatooine", "url": TATOOINE}))
            .unwrap();

        let projection = fx.projector.project(&luke());

        assert_eq!(
            projection.fields["homeworld"],
            DisplayValue::References(vec![ReferenceSlot::Resolved(planet)])
        );
    }

    #[test]
    fn test_project_keeps_raw_url_for_misses() {
        let fx = fixture(LocaleTable::default());

        let projection = fx.projector.project(&luke());

        assert_eq!(
            projection.fields["films"],
            DisplayValue::References(vec![
                ReferenceSlot::Unresolved(NEW_HOPE.into()),
                ReferenceSlot::Unresolved(EMPIRE.into()),
            ])
        );
        assert_eq!(projection.unresolved.len(), 3);
        assert_eq!(
            projection.unresolved[2],
            UnresolvedSlot {
                label: "films".into(),
                index: 1,
                url: EMPIRE.into()
            }
        );
    }

    #[test]
    fn test_project_translates_keys() {
        let locale: LocaleTable = [
            ("name".to_string(), "Имя".to_string()),
            ("homeworld".to_string(), "Родина".to_string()),
        ]
        .into_iter()
        .collect();
        let fx = fixture(locale);

        let projection = fx.projector.project(&luke());

        assert_eq!(
            projection.fields["Имя"],
            DisplayValue::Plain(json!("Luke Skywalker"))
        );
        assert!(projection.fields.contains_key("Родина"));
        assert!(projection.fields.contains_key("height"));
    }

    #[tokio::test]
    async fn test_clashing_translations_keep_fields_and_patches_apart() {
        let locale: LocaleTable = [
            ("homeworld".to_string(), "Origin".to_string()),
            ("birthplace".to_string(), "Origin".to_string()),
        ]
        .into_iter()
        .collect();
        let fx = fixture(locale);
        let naboo = "https://swapi.dev/api/planets/8/";
        fx.transport
            .route(TATOOINE, json!({"name": "Tatooine", "url": TATOOINE}));
        fx.transport
            .route(naboo, json!({"name": "Naboo", "url": naboo}));
        let item = CatalogItem::from_value(json!({
            "homeworld": TATOOINE,
            "birthplace": naboo,
            "url": "https://swapi.dev/api/people/11/"
        }))
        .unwrap();

        let projection = fx.projector.project(&item);
        let labels: Vec<_> = projection.unresolved.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Origin", "birthplace"]);

        fx.projector.present(&item);
        fx.queue.wait_idle().await;

        let fields = fx.store.snapshot().selection.fields;
        assert_eq!(fields["Origin"].render(), "Tatooine");
        assert_eq!(fields["birthplace"].render(), "Naboo");
    }

    #[test]
    fn test_project_keeps_non_url_list_elements_literal() {
        let fx = fixture(LocaleTable::default());
        let item = CatalogItem::from_value(json!({
            "tags": ["jedi", 3],
            "url": "https://swapi.dev/api/people/1/"
        }))
        .unwrap();

        let projection = fx.projector.project(&item);

        assert_eq!(
            projection.fields["tags"],
            DisplayValue::References(vec![
                ReferenceSlot::Literal(json!("jedi")),
                ReferenceSlot::Literal(json!(3)),
            ])
        );
        assert!(projection.unresolved.is_empty());
    }

    #[tokio::test]
    async fn test_present_fetches_each_missing_url_once_and_patches_slots() {
        let fx = fixture(LocaleTable::default());
        fx.transport
            .route(TATOOINE, json!({"name": "Tatooine", "url": TATOOINE}));
        fx.transport
            .route(NEW_HOPE, json!({"title": "A New Hope", "url": NEW_HOPE}));
        fx.transport.route_status(EMPIRE, 500);

        let generation = fx.projector.present(&luke());
        let snapshot = fx.store.snapshot();
        assert!(snapshot.selected());
        assert_eq!(snapshot.selection.generation, generation);

        fx.queue.wait_idle().await;

        let fields = fx.store.snapshot().selection.fields;
        assert_eq!(fields["homeworld"].render(), "Tatooine");
        assert_eq!(
            fields["films"].render(),
            format!("A New Hope, {}", EMPIRE)
        );
        assert_eq!(fx.transport.hits(TATOOINE), 1);
        assert_eq!(fx.transport.hits(NEW_HOPE), 1);
        assert_eq!(fx.transport.hits(EMPIRE), 1);
    }

    #[tokio::test]
    async fn test_duplicate_references_share_one_fetch() {
        let fx = fixture(LocaleTable::default());
        fx.transport
            .route(TATOOINE, json!({"name": "Tatooine", "url": TATOOINE}));
        let item = CatalogItem::from_value(json!({
            "homeworld": TATOOINE,
            "birthplace": TATOOINE,
            "url": "https://swapi.dev/api/people/1/"
        }))
        .unwrap();

        fx.projector.present(&item);
        fx.queue.wait_idle().await;

        let fields = fx.store.snapshot().selection.fields;
        assert_eq!(fields["homeworld"].render(), "Tatooine");
        assert_eq!(fields["birthplace"].render(), "Tatooine");
        assert_eq!(fx.transport.hits(TATOOINE), 1);
    }

    #[tokio::test]
    async fn test_late_resolution_does_not_touch_newer_selection() {
        let fx = fixture(LocaleTable::default());
        fx.transport
            .route(TATOOINE, json!({"name": "Tatooine", "url": TATOOINE}));
        fx.transport.hold(TATOOINE);
        let item = CatalogItem::from_value(json!({
            "homeworld": TATOOINE,
            "url": "https://swapi.dev/api/people/1/"
        }))
        .unwrap();

        fx.projector.present(&item);
        let newer = fx.projector.present(&item);
        fx.transport.release(TATOOINE);
        fx.queue.wait_idle().await;

        let selection = fx.store.snapshot().selection;
        assert_eq!(selection.generation, newer);
        // The newer view queued the same URL and joined the pending fetch,
        // so its own continuation fills the slot.
        assert_eq!(selection.fields["homeworld"].render(), "Tatooine");
        assert_eq!(fx.transport.hits(TATOOINE), 1);
    }
}
