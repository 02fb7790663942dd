// src/config/mod.rs

//! Configuration and recipe input.
//!
//! - [`model`] holds the serde structs for `Stepdag.toml`.
//! - [`validate`] turns a `RawConfigFile` into a checked `ConfigFile`.
//! - [`loader`] reads config and recipe files from disk.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_recipe, parse_recipe, resolve_config};
pub use model::{ConfigFile, LayoutConfig, RawConfigFile, TimerSection};
