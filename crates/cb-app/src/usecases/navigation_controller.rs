//! Keeps the visible selection and the session history in sync.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cb_core::link::item_url;
use cb_core::navigation::{
    location_with_selection, selection_from_location, NavigationAction, NavigationEvent,
    NavigationState, NavigationStateMachine,
};
use cb_core::ports::HistoryPort;
use cb_core::{CatalogItem, ItemKey};
use cb_infra::ObjectCache;
use tracing::{debug, info, warn};

use super::detail_projector::DetailProjector;
use crate::resolution::PendingResolutionQueue;

pub struct NavigationController {
    presenter: Arc<Presenter>,
    cache: Arc<ObjectCache>,
    queue: PendingResolutionQueue,
    api_root: String,
}

/// The part of the controller that resolution continuations need.
struct Presenter {
    state: Mutex<NavigationState>,
    projector: Arc<DetailProjector>,
    history: Arc<dyn HistoryPort>,
}

impl NavigationController {
    pub fn new(
        projector: Arc<DetailProjector>,
        history: Arc<dyn HistoryPort>,
        cache: Arc<ObjectCache>,
        queue: PendingResolutionQueue,
        api_root: impl Into<String>,
    ) -> Self {
        Self {
            presenter: Arc::new(Presenter {
                state: Mutex::new(NavigationState::default()),
                projector,
                history,
            }),
            cache,
            queue,
            api_root: api_root.into(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.presenter.state().clone()
    }

    /// Honour a selection already encoded in the current location.
    pub fn start(&self) {
        self.on_location_changed();
    }

    /// The user picked `key`: show it and record a history entry.
    pub fn pick(&self, key: ItemKey) {
        info!(key = %key, "item picked");
        self.dispatch(NavigationEvent::ItemPicked { key });
    }

    /// The location changed underneath us (initial load, back or forward).
    ///
    /// A location carrying both `type` and `id` is shown without recording
    /// history. Anything else clears the selection state but leaves the
    /// current view on screen.
    pub fn on_location_changed(&self) {
        let location = self.presenter.history.current_location();
        let target = selection_from_location(&location);
        debug!(location = %location, target = ?target, "location changed");
        self.dispatch(NavigationEvent::LocationChanged { target });
    }

    fn dispatch(&self, event: NavigationEvent) {
        let actions = {
            let mut state = self.presenter.state();
            let (next, actions) = NavigationStateMachine::transition(state.clone(), event);
            *state = next;
            actions
        };

        for action in actions {
            self.execute(action);
        }
    }

    fn execute(&self, action: NavigationAction) {
        match action {
            NavigationAction::Show {
                key,
                record_history,
            } => match self.cache.lookup(&key) {
                Some(item) => self.presenter.show(&key, &item, record_history),
                None => {
                    let url = item_url(&self.api_root, &key);
                    debug!(key = %key, url = %url, "selection not cached, queueing");
                    let presenter = Arc::clone(&self.presenter);
                    self.queue.await_item(&url, move |item| {
                        if presenter.is_current(&key) {
                            presenter.show(&key, &item, record_history);
                        } else {
                            debug!(key = %key, "selection superseded before it arrived");
                        }
                    });
                }
            },
        }
    }
}

impl Presenter {
    fn state(&self) -> MutexGuard<'_, NavigationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, key: &ItemKey) -> bool {
        matches!(&*self.state(), NavigationState::Selected { key: current } if current == key)
    }

    fn show(&self, key: &ItemKey, item: &CatalogItem, record_history: bool) {
        self.projector.present(item);
        if !record_history {
            return;
        }

        let current = self.history.current_location();
        match location_with_selection(&current, key) {
            Ok(location) if location == current => {
                debug!(location = %location, "location unchanged, no history entry");
            }
            Ok(location) => {
                debug!(location = %location, "history entry pushed");
                self.history.push(location);
            }
            Err(err) => warn!(location = %current, error = %err, "cannot encode selection"),
        }
    }
}
