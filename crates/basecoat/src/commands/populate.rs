//! `basecoat populate` -- insert randomly generated formulas.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use basecoat_storage::Storage;

use crate::cli::PopulateArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;
use crate::seed::fake_formulas;

/// Execute the `basecoat populate` command.
pub fn run(ctx: &RuntimeContext, args: &PopulateArgs) -> Result<()> {
    let store = ctx.open_store()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let details = fake_formulas(&mut rng, args.count, &ctx.config.seed);
    let ids = store
        .insert_formulas(&details)
        .context("failed to insert generated formulas")?;
    info!(count = ids.len(), "populated formulas");

    if ctx.json {
        output_json(&serde_json::json!({ "inserted": ids }));
    } else if !ctx.quiet {
        println!("Inserted {} formulas", ids.len());
    }
    Ok(())
}
