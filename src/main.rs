//! Aurora - Voice-First Marketplace Command Console
//!
//! Entry point that handles CLI argument parsing and mode switching
//! between one-shot command execution and the interactive REPL.

use std::path::PathBuf;

use clap::Parser;

use aurora::app::App;
use aurora::catalog::MarketplaceKey;
use aurora::ui::cli::{run_cli, run_once};

/// Aurora: voice-first marketplace command console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial marketplace selection
    #[arg(short, long, value_enum, default_value = "amazon")]
    marketplace: MarketplaceKey,

    /// Preload raw catalog text from a file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Run a single command and exit instead of starting the REPL
    #[arg(long)]
    command: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    // 1. Parse command line arguments
    let args = Args::parse();

    // 2. Initialize logger with verbosity level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    ))
    .init();

    log::info!("Aurora Console Initialized");
    log::debug!("Marketplace: {:?}", args.marketplace);
    log::debug!("Catalog preload: {:?}", args.catalog);

    // 3. Boot the shell, preload raw data if asked
    let mut app = App::new(args.marketplace);
    if let Some(path) = args.catalog.as_deref() {
        let lines = app.load_raw_catalog(path)?;
        log::debug!("Preloaded {} catalog lines", lines);
    }

    // 4. Branch based on execution mode
    if let Some(command) = args.command.as_deref() {
        run_once(&mut app, command);
    } else {
        println!("[*] Aurora v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
        run_cli(&mut app)?;
    }

    Ok(())
}
