//! Catalog use cases
//!
//! ```text
//! CategoryTree::load_root / expand      → category listings, items cached
//!         ↓
//! NavigationController::pick            → (type, id) selected, history pushed
//! NavigationController::on_location_changed
//!         ↓
//! DetailProjector::present              → selection published, misses queued
//!         ↓
//! PendingResolutionQueue                → slots patched as items arrive
//! ```

pub mod category_tree;
pub mod detail_projector;
pub mod load_statistics;
pub mod navigation_controller;

pub use category_tree::{CategoryTree, ExpandOutcome};
pub use detail_projector::{DetailProjector, Projection, UnresolvedSlot};
pub use load_statistics::{LoadStatistics, UNKNOWN_COUNT};
pub use navigation_controller::NavigationController;
