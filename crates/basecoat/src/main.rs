//! `basecoat` -- paint-formula record keeping CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;
mod seed;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::debug;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    let interrupt = install_interrupt_handler();

    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("basecoat=debug,basecoat_upsert=debug,basecoat_storage=debug")
            .with_writer(std::io::stderr)
            .init();
    }
    if let Err(e) = interrupt {
        debug!(error = %e, "Ctrl+C handler not installed");
    }

    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => exit_with_error(cli.global.json, &e),
    };

    let result = match cli.command {
        Some(Commands::Init(args)) => commands::init::run(&ctx, &args),
        Some(Commands::List) => commands::list::run(&ctx),
        Some(Commands::Show(args)) => commands::show::run(&ctx, &args),
        Some(Commands::Export(args)) => commands::export::run(&ctx, &args),
        Some(Commands::Submit(args)) => commands::submit::run(&ctx, &args),
        Some(Commands::Populate(args)) => commands::populate::run(&ctx, &args),
        Some(Commands::Empty(args)) => commands::empty::run(&ctx, &args),
        Some(Commands::Stats) => commands::stats::run(&ctx),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        exit_with_error(ctx.json, &e);
    }
}

/// First Ctrl+C: exit cleanly. Second: force exit.
fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(130);
    })
}

/// Print the error (as JSON in JSON mode) and exit with code 1.
fn exit_with_error(json: bool, e: &anyhow::Error) -> ! {
    if json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", e),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else {
        eprintln!("Error: {:#}", e);
    }
    std::process::exit(1);
}
