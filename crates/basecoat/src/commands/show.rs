//! `basecoat show` -- a formula with its colorants and bases.

use anyhow::{Context, Result};

use basecoat_storage::Storage;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::{format_formula_detail, output_json};

/// Execute the `basecoat show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let detail = store
        .get_formula_detail(args.id)
        .with_context(|| format!("failed to load formula {}", args.id))?;

    if ctx.json {
        output_json(&detail);
    } else {
        print!("{}", format_formula_detail(&detail));
    }
    Ok(())
}
