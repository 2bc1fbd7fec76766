// src/config/mod.rs

//! Command store configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load and save the store through a `Persistence` implementation (`loader.rs`).
//! - Validate basic invariants like id uniqueness (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_config_path, load_and_validate, parse_and_validate, Persistence, TomlPersistence,
};
pub use model::{parse_delay, CommandRecord, ConfigFile, RawConfigFile};
pub use validate::validate_raw_config;
