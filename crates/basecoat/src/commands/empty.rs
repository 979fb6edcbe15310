//! `basecoat empty` -- delete every row, children first.

use anyhow::{Result, bail};

use basecoat_storage::Storage;

use crate::cli::EmptyArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `basecoat empty` command.
pub fn run(ctx: &RuntimeContext, args: &EmptyArgs) -> Result<()> {
    if !args.yes {
        bail!("this deletes all formulas and their colorants and bases\nHint: re-run with --yes");
    }

    let store = ctx.open_store()?;
    let cleared = store.delete_all()?;

    if ctx.json {
        output_json(&serde_json::json!({
            "colorants": cleared.colorants,
            "bases": cleared.bases,
            "formulas": cleared.formulas,
        }));
    } else if !ctx.quiet {
        for (table, rows) in [
            ("colorants", cleared.colorants),
            ("bases", cleared.bases),
            ("formulas", cleared.formulas),
        ] {
            println!("Cleared table: {table} ({rows} rows)");
        }
    }
    Ok(())
}
