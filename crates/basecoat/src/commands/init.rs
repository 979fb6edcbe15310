//! `basecoat init` -- create a `.basecoat` directory and database.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use basecoat_config::basecoat_dir::BASECOAT_DIR_NAME;
use basecoat_config::config::CONFIG_FILE_NAME;
use basecoat_config::{BasecoatConfig, ensure_basecoat_dir, load_config, save_config};
use basecoat_storage::SqliteStore;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, render_pass};

/// Default gitignore content for the `.basecoat` directory.
const GITIGNORE_CONTENT: &str = r#"# basecoat database files
*.db
*.db-journal
*.db-wal
*.db-shm
"#;

/// Execute the `basecoat init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let basecoat_dir = cwd.join(BASECOAT_DIR_NAME);

    let config = load_config(&basecoat_dir).context("failed to load config")?;
    let db_path = match &ctx.db_override {
        Some(p) => p.clone(),
        None => config.database_path(&basecoat_dir),
    };

    if db_path.exists() {
        if !args.force {
            bail!(
                "found existing database at {}\n\n\
                 This workspace is already initialized.\n\
                 Use --force to re-initialize (deletes all formulas).",
                db_path.display()
            );
        }
        remove_database(&db_path)?;
    }

    let basecoat_dir = ensure_basecoat_dir(&basecoat_dir)
        .with_context(|| format!("failed to create directory: {}", basecoat_dir.display()))?;

    let gitignore_path = basecoat_dir.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(&gitignore_path, GITIGNORE_CONTENT).with_context(|| {
            format!("failed to create .gitignore: {}", gitignore_path.display())
        })?;
    }

    if !basecoat_dir.join(CONFIG_FILE_NAME).exists() {
        save_config(&basecoat_dir, &BasecoatConfig::default())
            .context("failed to write config.yaml")?;
    }

    SqliteStore::open(&db_path)
        .with_context(|| format!("failed to create database: {}", db_path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "basecoat_dir": basecoat_dir.display().to_string(),
            "database": db_path.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!("{} basecoat initialized", render_pass("\u{2713}"));
        println!("  Database: {}", db_path.display());
        println!();
        println!("Run `basecoat submit formula.json` to add your first formula.");
    }
    Ok(())
}

/// Deletes a database file along with its WAL and shared-memory siblings.
fn remove_database(db_path: &Path) -> Result<()> {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut name = db_path.as_os_str().to_owned();
        name.push(suffix);
        let path = Path::new(&name);
        if path.exists() {
            debug!(path = %path.display(), "removing database file");
            fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}
