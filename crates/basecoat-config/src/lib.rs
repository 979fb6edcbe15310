//! Configuration management for basecoat.
//!
//! Loads and saves `.basecoat/config.yaml` and discovers the `.basecoat/`
//! directory in the filesystem.

pub mod basecoat_dir;
pub mod config;

pub use basecoat_dir::{ensure_basecoat_dir, find_basecoat_dir, find_basecoat_dir_or_error};
pub use config::{BasecoatConfig, ConfigError, SeedConfig, UpsertConfig, load_config, save_config};
