//! Observable render state.
//!
//! Use cases publish every change through [`RenderStore`]; a renderer
//! subscribes with [`RenderStore::subscribe`] and redraws on each update.

mod store;

pub use store::{RenderSnapshot, RenderStore};
