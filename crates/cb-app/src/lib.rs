//! Catalog browser application layer
//!
//! Use cases and runtime services that sit between the ports in `cb-core`
//! and a renderer subscribed to [`render::RenderStore`].

pub mod error;
pub mod render;
pub mod resolution;
pub mod session;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AppError;
pub use render::{RenderSnapshot, RenderStore};
pub use resolution::PendingResolutionQueue;
pub use session::{CatalogDeps, CatalogSession};
