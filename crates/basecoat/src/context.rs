//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the discovered
//! `.basecoat/` directory, the layered configuration, and the global flags.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use basecoat_config::basecoat_dir::{BASECOAT_DIR_NAME, find_basecoat_dir};
use basecoat_config::{BasecoatConfig, ConfigError, load_config};
use basecoat_storage::SqliteStore;
use basecoat_upsert::UpsertOptions;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit database path from `--db`.
    pub db_override: Option<PathBuf>,

    /// Discovered `.basecoat/` directory, if any.
    pub basecoat_dir: Option<PathBuf>,

    /// Layered configuration (defaults, config.yaml, environment).
    pub config: BasecoatConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to get current directory")?;
        let basecoat_dir = find_basecoat_dir(&cwd);

        let config_dir = basecoat_dir
            .clone()
            .unwrap_or_else(|| cwd.join(BASECOAT_DIR_NAME));
        let config = load_config(&config_dir)
            .with_context(|| format!("failed to load config from {}", config_dir.display()))?;

        Ok(Self {
            db_override: global.db.clone(),
            json: global.json || config.json,
            basecoat_dir,
            config,
            quiet: global.quiet,
        })
    }

    /// Returns the database file to use: `--db` if given, otherwise the
    /// configured database inside the discovered `.basecoat/` directory.
    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        if let Some(ref p) = self.db_override {
            return Ok(p.clone());
        }
        let dir = self
            .basecoat_dir
            .as_deref()
            .ok_or(ConfigError::DirNotFound)?;
        Ok(self.config.database_path(dir))
    }

    /// Opens the existing database.
    pub fn open_store(&self) -> Result<SqliteStore> {
        let db_path = self.resolve_db_path()?;
        open_store_at(&db_path)
    }

    /// Submission options from config, with `--keep-missing` applied.
    pub fn upsert_options(&self, keep_missing: bool) -> UpsertOptions {
        UpsertOptions {
            prune_missing: self.config.upsert.prune_missing && !keep_missing,
            title_case: self.config.upsert.title_case,
        }
    }
}

fn open_store_at(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open_existing(db_path).with_context(|| {
        format!(
            "failed to open database: {}\nHint: run 'basecoat init' to create one",
            db_path.display()
        )
    })
}
