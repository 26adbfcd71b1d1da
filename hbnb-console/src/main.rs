//! HBnB command interpreter
//!
//! Loads the backing file once at startup, then reads commands from stdin
//! until `quit`, `EOF` or end of input. Shows a prompt only when stdin is a
//! terminal.
//!
//! Usage:
//!   hbnb --file file.json

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hbnb_console::Console;
use hbnb_storage::{DEFAULT_FILE, FileStorage, ReloadPolicy, StorageConfig};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "hbnb")]
#[command(about = "HBnB object registry console")]
struct Args {
    /// Path to the JSON backing file
    #[arg(short, long, default_value = DEFAULT_FILE)]
    file: PathBuf,

    /// Fail on stored objects of unknown type instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Indent the backing file
    #[arg(long)]
    pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = StorageConfig {
        path: args.file,
        reload_policy: if args.strict {
            ReloadPolicy::Strict
        } else {
            ReloadPolicy::SkipUnknown
        },
        pretty: args.pretty,
    };
    debug!("Opening storage at {:?}", config.path);
    let storage = FileStorage::open(config.clone())
        .with_context(|| format!("failed to load {}", config.path.display()))?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut console = Console::new(storage, io::stdout());
    console
        .run(stdin.lock(), interactive)
        .context("console terminated")?;
    Ok(())
}
