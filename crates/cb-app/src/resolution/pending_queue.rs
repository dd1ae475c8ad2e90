//! Interest registry for items that are not cached yet.
//!
//! The first registration for a URL starts a fetch; later registrations for
//! the same URL only join the waiting list. When the fetch succeeds the item
//! is cached and every continuation runs once, in registration order. When
//! it fails the continuations are dropped without being called, leaving the
//! raw URL on screen.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cb_core::link::normalize_scheme;
use cb_core::ports::FetchPort;
use cb_core::CatalogItem;
use cb_infra::ObjectCache;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub type Continuation = Box<dyn FnOnce(Arc<CatalogItem>) + Send + 'static>;

#[derive(Clone)]
pub struct PendingResolutionQueue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    fetcher: Arc<dyn FetchPort>,
    cache: Arc<ObjectCache>,
    waiting: Mutex<HashMap<String, Vec<Continuation>>>,
    outstanding: watch::Sender<usize>,
}

impl PendingResolutionQueue {
    pub fn new(fetcher: Arc<dyn FetchPort>, cache: Arc<ObjectCache>) -> Self {
        let (outstanding, _rx) = watch::channel(0);
        Self {
            inner: Arc::new(QueueInner {
                fetcher,
                cache,
                waiting: Mutex::new(HashMap::new()),
                outstanding,
            }),
        }
    }

    /// Register `continuation` to run once the item at `url` is cached.
    ///
    /// Returns the handle of the resolution task when this call started the
    /// fetch, `None` when it joined an existing waiting list.
    pub fn await_item<F>(&self, url: &str, continuation: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Arc<CatalogItem>) + Send + 'static,
    {
        let url = normalize_scheme(url).into_owned();

        {
            let mut waiting = self.inner.waiting();
            if let Some(list) = waiting.get_mut(&url) {
                list.push(Box::new(continuation));
                debug!(url = %url, waiters = list.len(), "joined pending resolution");
                return None;
            }
            waiting.insert(url.clone(), vec![Box::new(continuation)]);
        }

        self.inner.outstanding.send_modify(|count| *count += 1);
        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move { inner.resolve(url).await }))
    }

    pub fn is_waiting(&self, url: &str) -> bool {
        self.inner
            .waiting()
            .contains_key(&*normalize_scheme(url))
    }

    /// Number of URLs with registered interest.
    pub fn waiting_count(&self) -> usize {
        self.inner.waiting().len()
    }

    /// Resolves once no resolution fetch is outstanding.
    ///
    /// Continuations that queue further resolutions keep the queue busy
    /// until those finish too.
    pub async fn wait_idle(&self) {
        let mut rx = self.inner.outstanding.subscribe();
        // The sender lives in `inner`, so the channel cannot close here.
        let _ = rx.wait_for(|count| *count == 0).await;
    }
}

impl QueueInner {
    fn waiting(&self) -> MutexGuard<'_, HashMap<String, Vec<Continuation>>> {
        self.waiting.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn resolve(&self, url: String) {
        let outcome = self.fetcher.fetch_json(&url).await;
        let continuations = self.waiting().remove(&url).unwrap_or_default();

        let item = match outcome {
            Ok(value) => match self.cache.insert_value(value) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(url = %url, error = %err, "resolved record cannot be cached");
                    None
                }
            },
            Err(err) => {
                debug!(url = %url, error = %err, "resolution failed");
                None
            }
        };

        match item {
            Some(item) => {
                debug!(url = %url, waiters = continuations.len(), "resolution delivered");
                for continuation in continuations {
                    continuation(Arc::clone(&item));
                }
            }
            None => {
                debug!(url = %url, dropped = continuations.len(), "continuations dropped");
            }
        }

        self.outstanding
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
