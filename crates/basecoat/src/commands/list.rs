//! `basecoat list` -- all formulas.

use anyhow::Result;

use basecoat_storage::Storage;

use crate::context::RuntimeContext;
use crate::output::{format_formula_row, output_json, output_table};

/// Execute the `basecoat list` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let store = ctx.open_store()?;
    let formulas = store.list_formulas()?;

    if ctx.json {
        output_json(&formulas);
        return Ok(());
    }

    if formulas.is_empty() {
        if !ctx.quiet {
            println!("No formulas found.");
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = formulas.iter().map(format_formula_row).collect();
    output_table(&["ID", "NUMBER", "NAME", "CUSTOMER"], &rows);
    Ok(())
}
