//! Session history with a back/forward cursor, standing in for the browser's.

use std::sync::{Mutex, MutexGuard, PoisonError};

use cb_core::ports::HistoryPort;
use tracing::debug;

pub struct InMemoryHistory {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: Vec<String>,
    cursor: usize,
}

impl InMemoryHistory {
    pub fn new(initial_location: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: vec![initial_location.into()],
                cursor: 0,
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Step back one entry. Returns the new location, or `None` at the start.
    pub fn back(&self) -> Option<String> {
        let mut inner = self.inner();
        if inner.cursor == 0 {
            return None;
        }
        inner.cursor -= 1;
        Some(inner.entries[inner.cursor].clone())
    }

    /// Step forward one entry. Returns the new location, or `None` at the end.
    pub fn forward(&self) -> Option<String> {
        let mut inner = self.inner();
        if inner.cursor + 1 >= inner.entries.len() {
            return None;
        }
        inner.cursor += 1;
        Some(inner.entries[inner.cursor].clone())
    }

    pub fn len(&self) -> usize {
        self.inner().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner().entries.is_empty()
    }
}

impl HistoryPort for InMemoryHistory {
    fn current_location(&self) -> String {
        let inner = self.inner();
        inner.entries[inner.cursor].clone()
    }

    fn push(&self, location: String) {
        let mut inner = self.inner();
        let keep = inner.cursor + 1;
        inner.entries.truncate(keep);
        debug!(location = %location, depth = keep + 1, "history entry pushed");
        inner.entries.push(location);
        inner.cursor = keep;
    }
}
