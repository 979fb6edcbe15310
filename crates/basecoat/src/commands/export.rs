//! `basecoat export` -- print a formula as a submission payload.
//!
//! The output is the update form of the formula, child ids included, so it
//! can be edited and passed back to `basecoat submit`.

use std::fs;

use anyhow::{Context, Result};

use basecoat_core::FormulaSubmission;
use basecoat_storage::Storage;

use crate::cli::ExportArgs;
use crate::context::RuntimeContext;

/// Execute the `basecoat export` command.
pub fn run(ctx: &RuntimeContext, args: &ExportArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let detail = store
        .get_formula_detail(args.id)
        .with_context(|| format!("failed to load formula {}", args.id))?;

    let payload = FormulaSubmission::from_detail(&detail);
    let json = serde_json::to_string_pretty(&payload).context("failed to serialize payload")?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !ctx.quiet {
                eprintln!("Exported formula {} to {}", args.id, path.display());
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}
