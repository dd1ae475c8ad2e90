//! Deferred resolution of cross-referenced items.

mod pending_queue;

pub use pending_queue::{Continuation, PendingResolutionQueue};
