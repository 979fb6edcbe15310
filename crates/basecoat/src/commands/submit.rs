//! `basecoat submit` -- create or update a formula from a JSON payload.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};

use basecoat_core::FormulaSubmission;
use basecoat_upsert::UpsertError;

use crate::cli::SubmitArgs;
use crate::context::RuntimeContext;
use crate::output::{format_outcome, output_json};

/// Execute the `basecoat submit` command.
pub fn run(ctx: &RuntimeContext, args: &SubmitArgs) -> Result<()> {
    let raw = read_payload(&args.file)?;
    let submission = FormulaSubmission::from_json(&raw)
        .with_context(|| format!("invalid formula payload in {}", source_name(&args.file)))?;

    let store = ctx.open_store()?;
    let opts = ctx.upsert_options(args.keep_missing);
    let outcome = basecoat_upsert::submit(&store, &submission, &opts).map_err(|e| {
        let what = if e.is_validation() {
            "formula rejected"
        } else if e.is_not_found() {
            "cannot update formula (omit formula_id to create one)"
        } else if matches!(&e, UpsertError::Storage(s) if s.is_constraint_violation()) {
            "formula conflicts with stored rows"
        } else {
            "failed to save formula"
        };
        anyhow::Error::new(e).context(what)
    })?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "formula_id": outcome.formula_id,
            "created": outcome.created,
            "colorants": outcome.colorants,
            "bases": outcome.bases,
        }));
    } else if !ctx.quiet {
        println!("{}", format_outcome(&outcome));
    }
    Ok(())
}

fn read_payload(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
    }
}

fn source_name(file: &str) -> &str {
    if file == "-" { "stdin" } else { file }
}
