//! ID type wrappers for type safety.

mod catalog;
mod id_macro;

pub use catalog::{ItemId, ItemType};
