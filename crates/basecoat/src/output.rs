//! Output formatting helpers for the `basecoat` CLI.
//!
//! JSON output, plain tables, and the human-readable formula display.

use std::env;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;

use basecoat_core::formula::{Formula, FormulaDetail};
use basecoat_upsert::{ChildCounts, UpsertOutcome};

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c);
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80);
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff);

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = write!(handle, "{}", render_table(headers, rows));
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push_str(&line(row.clone()));
    }
    out
}

/// Returns `true` when stdout should be colored.
///
/// Honors `NO_COLOR`, `CLICOLOR=0`, `TERM=dumb` and `CLICOLOR_FORCE`.
pub fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var("TERM").as_deref() == Ok("dumb") {
        return false;
    }
    if env::var_os("CLICOLOR_FORCE").is_some() {
        return true;
    }
    io::stdout().is_terminal()
}

fn color_str(s: &str, (r, g, b): (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(r, g, b).to_string()
    } else {
        s.to_string()
    }
}

/// Renders text with success (green) styling.
pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders text with accent (blue) styling.
pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// One table row for `basecoat list`.
pub fn format_formula_row(formula: &Formula) -> Vec<String> {
    vec![
        formula.id.to_string(),
        formula.formula_number.clone(),
        formula.formula_name.clone(),
        formula.customer_name.clone(),
    ]
}

/// Multi-line display of a formula and its children.
pub fn format_formula_detail(detail: &FormulaDetail) -> String {
    let f = &detail.formula;
    let mut out = format!(
        "{} {}",
        render_accent(&format!("#{}", f.id)),
        render_bold(&f.formula_name)
    );
    if !f.formula_number.is_empty() {
        out.push_str(&format!("  {}", render_muted(&f.formula_number)));
    }
    out.push('\n');

    if !f.customer_name.is_empty() {
        out.push_str(&format!("Customer: {}\n", f.customer_name));
    }
    if !f.summary.is_empty() {
        out.push_str(&format!("Summary:  {}\n", f.summary));
    }
    if !f.notes.is_empty() {
        out.push_str(&format!("Notes:    {}\n", f.notes));
    }
    out.push_str(&render_muted(&format!(
        "Updated:  {}\n",
        f.updated_at.format("%Y-%m-%d %H:%M")
    )));

    out.push_str(&format!("\nColorants ({}):\n", detail.colorants.len()));
    for c in &detail.colorants {
        out.push_str(&format!(
            "  {:<24} {}\n",
            c.colorant_name,
            render_muted(&c.amount)
        ));
    }

    out.push_str(&format!("\nBases ({}):\n", detail.bases.len()));
    for b in &detail.bases {
        out.push_str(&format!(
            "  {:<24} {}\n",
            b.base_name,
            render_muted(&b.product_name)
        ));
    }
    out
}

fn format_counts(label: &str, counts: &ChildCounts) -> String {
    format!(
        "{label}: {} added, {} updated, {} removed",
        counts.inserted, counts.updated, counts.deleted
    )
}

/// One-line summary of a submission.
pub fn format_outcome(outcome: &UpsertOutcome) -> String {
    let verb = if outcome.created { "Created" } else { "Updated" };
    format!(
        "{} {} formula {} ({}; {})",
        render_pass("\u{2713}"),
        verb,
        outcome.formula_id,
        format_counts("colorants", &outcome.colorants),
        format_counts("bases", &outcome.bases)
    )
}
