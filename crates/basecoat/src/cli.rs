//! Clap CLI definitions for the `basecoat` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// basecoat -- paint-formula records.
///
/// Keeps paint formulas with their colorant and base lines in a local SQLite
/// database. Formulas are created and edited by submitting JSON payloads.
#[derive(Parser, Debug)]
#[command(
    name = "basecoat",
    about = "Paint-formula record keeping",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Database file (default: auto-discover .basecoat/).
    #[arg(long, global = true, env = "BASECOAT_DB")]
    pub db: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .basecoat directory and database here.
    Init(InitArgs),

    /// List all formulas.
    #[command(alias = "ls")]
    List,

    /// Show a formula with its colorants and bases.
    #[command(alias = "view")]
    Show(ShowArgs),

    /// Print a formula as an editable submission payload.
    Export(ExportArgs),

    /// Create or update a formula from a JSON payload.
    Submit(SubmitArgs),

    /// Insert randomly generated formulas (development data).
    Populate(PopulateArgs),

    /// Delete every formula, colorant and base.
    Empty(EmptyArgs),

    /// Show row counts.
    Stats,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Re-create the database even if one exists (deletes all data).
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Formula id.
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Formula id.
    pub id: i64,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Payload file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub file: String,

    /// Leave stored colorants and bases that the payload omits.
    #[arg(long)]
    pub keep_missing: bool,
}

#[derive(Args, Debug)]
pub struct PopulateArgs {
    /// Number of formulas to generate.
    pub count: usize,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct EmptyArgs {
    /// Confirm deletion.
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}
