//! Session-scoped service graph.
//!
//! The in-flight request registry, the object cache and the pending-resolution
//! registry are created here and handed to the use cases explicitly. Dropping
//! the session tears them down.

use std::sync::Arc;

use cb_core::ports::{FetchPort, HistoryPort};
use cb_core::LocaleTable;
use cb_infra::ObjectCache;
use tracing::info;

use crate::error::AppError;
use crate::render::RenderStore;
use crate::resolution::PendingResolutionQueue;
use crate::usecases::{CategoryTree, DetailProjector, LoadStatistics, NavigationController};

/// External collaborators a session is built from.
pub struct CatalogDeps {
    pub fetcher: Arc<dyn FetchPort>,
    pub history: Arc<dyn HistoryPort>,
    pub locale: Arc<LocaleTable>,
    /// Catalog root document URL; item URLs are derived from it too.
    pub api_root: String,
}

pub struct CatalogSession {
    store: Arc<RenderStore>,
    cache: Arc<ObjectCache>,
    queue: PendingResolutionQueue,
    tree: Arc<CategoryTree>,
    projector: Arc<DetailProjector>,
    navigation: NavigationController,
    statistics: LoadStatistics,
}

impl CatalogSession {
    pub fn new(deps: CatalogDeps) -> Self {
        let CatalogDeps {
            fetcher,
            history,
            locale,
            api_root,
        } = deps;

        let store = Arc::new(RenderStore::new());
        let cache = Arc::new(ObjectCache::new());
        let queue = PendingResolutionQueue::new(Arc::clone(&fetcher), Arc::clone(&cache));

        let tree = Arc::new(CategoryTree::new(
            fetcher,
            Arc::clone(&cache),
            Arc::clone(&store),
            Arc::clone(&locale),
            api_root.clone(),
        ));
        let projector = Arc::new(DetailProjector::new(
            Arc::clone(&cache),
            queue.clone(),
            Arc::clone(&store),
            locale,
        ));
        let navigation = NavigationController::new(
            Arc::clone(&projector),
            history,
            Arc::clone(&cache),
            queue.clone(),
            api_root,
        );
        let statistics = LoadStatistics::new(Arc::clone(&tree), Arc::clone(&store));

        Self {
            store,
            cache,
            queue,
            tree,
            projector,
            navigation,
            statistics,
        }
    }

    /// Initial page load: honour a deep link, then load the category list.
    pub async fn start(&self) -> Result<usize, AppError> {
        info!(root = %self.tree.root_url(), "starting catalog session");
        self.navigation.start();
        self.tree.load_root().await
    }

    /// Resolves once every queued cross-reference has settled.
    pub async fn wait_idle(&self) {
        self.queue.wait_idle().await;
    }

    pub fn store(&self) -> &Arc<RenderStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<ObjectCache> {
        &self.cache
    }

    pub fn queue(&self) -> &PendingResolutionQueue {
        &self.queue
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn projector(&self) -> &DetailProjector {
        &self.projector
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn statistics(&self) -> &LoadStatistics {
        &self.statistics
    }
}
