//! `basecoat stats` -- row counts.

use anyhow::Result;

use basecoat_storage::Storage;

use crate::context::RuntimeContext;
use crate::output::{output_json, render_bold};

/// Execute the `basecoat stats` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.open_store()?;
    let stats = store.statistics()?;

    if ctx.json {
        output_json(&serde_json::json!({
            "formulas": stats.formulas,
            "colorants": stats.colorants,
            "bases": stats.bases,
            "customers": stats.customers,
        }));
    } else {
        println!("{}", render_bold("Formula statistics"));
        println!("  Formulas:   {}", stats.formulas);
        println!("  Colorants:  {}", stats.colorants);
        println!("  Bases:      {}", stats.bases);
        println!("  Customers:  {}", stats.customers);
    }
    Ok(())
}
