//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - ✅ Define configuration data structures
//! - ✅ Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! ❌ **No business logic or policies**
//! ❌ **No validation logic**
//! ❌ **No default value calculation**
//!
//! > **This module contains data only, no policy, no validation.**
//! > Effective defaults are applied by the bootstrap wiring.

mod app_config;

pub use app_config::AppConfig;
