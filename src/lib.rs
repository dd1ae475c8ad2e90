//! Catalog Browser Library
//!
//! Bootstrap (config, tracing, wiring), the command line surface and the
//! plain-text renderer for a [`cb_app::CatalogSession`].

pub mod bootstrap;
pub mod cli;
pub mod view;

pub use bootstrap::run::run;
pub use cli::Cli;
