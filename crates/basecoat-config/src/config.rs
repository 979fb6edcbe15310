//! Configuration types and loading.
//!
//! The main entry point is [`BasecoatConfig`], which represents the contents
//! of `.basecoat/config.yaml`. Values are layered with figment: built-in
//! defaults, then the YAML file, then `BASECOAT_` environment variables
//! (`BASECOAT_UPSERT__PRUNE_MISSING=false` sets `upsert.prune-missing`).

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of environment variables that override config values.
pub const ENV_PREFIX: &str = "BASECOAT_";

/// Name of the config file inside the `.basecoat/` directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// A layered value (file or environment) had the wrong shape.
    #[error("invalid configuration: {0}")]
    Extract(#[from] figment::Error),

    /// The `.basecoat/` directory was not found.
    #[error("no .basecoat directory found (run 'basecoat init' first)")]
    DirNotFound,
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Settings for the formula submission workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpsertConfig {
    /// Delete stored colorants and bases that an update leaves out.
    #[serde(default = "default_true")]
    pub prune_missing: bool,

    /// Title-case formula and customer names on save.
    #[serde(default = "default_true")]
    pub title_case: bool,
}

impl Default for UpsertConfig {
    fn default() -> Self {
        Self {
            prune_missing: true,
            title_case: true,
        }
    }
}

/// Settings for `basecoat populate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeedConfig {
    #[serde(default = "default_colorants_per_formula")]
    pub colorants_per_formula: usize,

    #[serde(default = "default_bases_per_formula")]
    pub bases_per_formula: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            colorants_per_formula: default_colorants_per_formula(),
            bases_per_formula: default_bases_per_formula(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_colorants_per_formula() -> usize {
    2
}

fn default_bases_per_formula() -> usize {
    1
}

fn default_database() -> String {
    "basecoat.db".to_string()
}

// ---------------------------------------------------------------------------
// BasecoatConfig
// ---------------------------------------------------------------------------

/// Contents of `.basecoat/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BasecoatConfig {
    /// Database file, relative to the `.basecoat/` directory unless absolute.
    #[serde(default = "default_database")]
    pub database: String,

    /// Emit JSON output by default.
    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub upsert: UpsertConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

impl Default for BasecoatConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            json: false,
            upsert: UpsertConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl BasecoatConfig {
    /// Resolves the database path against the `.basecoat/` directory.
    pub fn database_path(&self, basecoat_dir: &Path) -> PathBuf {
        let db = Path::new(&self.database);
        if db.is_absolute() {
            db.to_path_buf()
        } else {
            basecoat_dir.join(db)
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Loads configuration for the given `.basecoat/` directory.
///
/// A missing or empty `config.yaml` yields the defaults. `BASECOAT_`
/// environment variables take precedence over the file.
pub fn load_config(basecoat_dir: &Path) -> Result<BasecoatConfig> {
    load_layered(basecoat_dir, ENV_PREFIX)
}

fn load_layered(basecoat_dir: &Path, env_prefix: &str) -> Result<BasecoatConfig> {
    let mut figment = Figment::from(Serialized::defaults(BasecoatConfig::default()));

    let config_path = basecoat_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        // An empty file is valid and yields default config.
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    }

    let env = Env::prefixed(env_prefix).map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replace("__", ".")
            .replace('_', "-")
            .into()
    });
    Ok(figment.merge(env).extract()?)
}

/// Saves configuration to `config.yaml` inside the given `.basecoat/`
/// directory, creating the directory if needed.
pub fn save_config(basecoat_dir: &Path, config: &BasecoatConfig) -> Result<()> {
    std::fs::create_dir_all(basecoat_dir)?;

    let config_path = basecoat_dir.join(CONFIG_FILE_NAME);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = BasecoatConfig::default();
        assert_eq!(cfg.database, "basecoat.db");
        assert!(!cfg.json);
        assert!(cfg.upsert.prune_missing);
        assert!(cfg.upsert.title_case);
        assert_eq!(cfg.seed.colorants_per_formula, 2);
        assert_eq!(cfg.seed.bases_per_formula, 1);
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_layered(dir.path(), "BASECOAT_TEST_MISSING_").unwrap();
        assert_eq!(cfg, BasecoatConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "  \n").unwrap();
        let cfg = load_layered(dir.path(), "BASECOAT_TEST_EMPTY_").unwrap();
        assert_eq!(cfg, BasecoatConfig::default());
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let basecoat_dir = dir.path().join(".basecoat");

        let mut cfg = BasecoatConfig::default();
        cfg.database = "paints.db".to_string();
        cfg.upsert.prune_missing = false;
        cfg.seed.colorants_per_formula = 4;

        save_config(&basecoat_dir, &cfg).unwrap();
        let loaded = load_layered(&basecoat_dir, "BASECOAT_TEST_ROUNDTRIP_").unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "json: true\nupsert:\n  title-case: false\n";
        let cfg: BasecoatConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.json);
        assert!(!cfg.upsert.title_case);
        // Everything else should be default
        assert!(cfg.upsert.prune_missing);
        assert_eq!(cfg.database, "basecoat.db");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "upsert:\n  prune-missing: true\nseed:\n  bases-per-formula: 3\n",
        )
        .unwrap();

        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("BASECOAT_TEST_ENV_UPSERT__PRUNE_MISSING", "false") };
        let cfg = load_layered(dir.path(), "BASECOAT_TEST_ENV_").unwrap();
        unsafe { std::env::remove_var("BASECOAT_TEST_ENV_UPSERT__PRUNE_MISSING") };

        assert!(!cfg.upsert.prune_missing);
        assert_eq!(cfg.seed.bases_per_formula, 3);
    }

    #[test]
    fn test_invalid_yaml_value() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "json: [1, 2]\n").unwrap();
        let err = load_layered(dir.path(), "BASECOAT_TEST_INVALID_").unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
    }

    #[test]
    fn test_database_path() {
        let mut cfg = BasecoatConfig::default();
        let dir = Path::new("/work/.basecoat");
        assert_eq!(cfg.database_path(dir), dir.join("basecoat.db"));

        cfg.database = "/srv/paint.db".to_string();
        assert_eq!(cfg.database_path(dir), PathBuf::from("/srv/paint.db"));
    }
}
