//! Discovery and management of the `.basecoat/` directory.
//!
//! The `.basecoat/` directory holds a project's config file and database.
//! This module finds it by walking up the directory tree and creates it for
//! `basecoat init`.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the basecoat metadata directory.
pub const BASECOAT_DIR_NAME: &str = ".basecoat";

/// The environment variable that can override the basecoat directory.
pub const BASECOAT_DIR_ENV: &str = "BASECOAT_DIR";

/// Walk up the directory tree from `start` looking for a `.basecoat/`
/// directory.
///
/// The `BASECOAT_DIR` environment variable is checked first. Returns `None`
/// if the filesystem root is reached without finding one.
///
/// # Examples
///
/// ```no_run
/// use basecoat_config::basecoat_dir::find_basecoat_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_basecoat_dir(Path::new(".")) {
///     println!("Found basecoat dir at {}", dir.display());
/// }
/// ```
pub fn find_basecoat_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(BASECOAT_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(BASECOAT_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_basecoat_dir`], but a missing directory is an error.
pub fn find_basecoat_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_basecoat_dir(start).ok_or(ConfigError::DirNotFound)
}

/// Ensure a `.basecoat/` directory exists at the given path.
///
/// If `path` itself is not called `.basecoat`, a `.basecoat/` subdirectory is
/// created under it. Returns the path to the `.basecoat/` directory.
pub fn ensure_basecoat_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let basecoat_dir = if path.ends_with(BASECOAT_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(BASECOAT_DIR_NAME)
    };

    std::fs::create_dir_all(&basecoat_dir)?;
    Ok(basecoat_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_basecoat_dir_in_temp() {
        let dir = tempfile::tempdir().unwrap();
        let basecoat = dir.path().join(".basecoat");
        std::fs::create_dir(&basecoat).unwrap();

        let found = find_basecoat_dir(dir.path()).unwrap();
        // Canonicalize both for comparison (handles /tmp vs /private/tmp).
        assert_eq!(
            found.canonicalize().unwrap(),
            basecoat.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_find_basecoat_dir_in_child() {
        let dir = tempfile::tempdir().unwrap();
        let basecoat = dir.path().join(".basecoat");
        std::fs::create_dir(&basecoat).unwrap();

        let child = dir.path().join("orders").join("2024");
        std::fs::create_dir_all(&child).unwrap();

        let found = find_basecoat_dir(&child).unwrap();
        assert_eq!(
            found.canonicalize().unwrap(),
            basecoat.canonicalize().unwrap()
        );
    }

    #[test]
    fn test_find_basecoat_dir_or_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".basecoat")).unwrap();
        assert!(find_basecoat_dir_or_error(dir.path()).is_ok());
    }

    #[test]
    fn test_find_missing_start_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_basecoat_dir(&dir.path().join("does-not-exist")).is_none());
    }

    #[test]
    fn test_ensure_basecoat_dir_creates() {
        let dir = tempfile::tempdir().unwrap();
        let result = ensure_basecoat_dir(dir.path()).unwrap();
        assert!(result.is_dir());
        assert!(result.ends_with(".basecoat"));
    }

    #[test]
    fn test_ensure_basecoat_dir_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let basecoat = dir.path().join(".basecoat");
        let first = ensure_basecoat_dir(&basecoat).unwrap();
        let second = ensure_basecoat_dir(dir.path()).unwrap();
        assert_eq!(first, basecoat);
        assert_eq!(first, second);
    }
}
