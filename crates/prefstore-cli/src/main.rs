use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prefstore_backend_file::{FileStore, STORE_PATH_ENV};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "prefstore")]
#[command(about = "Read and write stored preferences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON store file (defaults to the per-user config directory)
    #[arg(long, global = true, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Namespace segment prepended to every key
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print a preference as JSON; prints nothing when unset
    Get {
        name: String,

        /// JSON value printed when the preference is unset (never stored)
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Store a preference. VALUE is parsed as JSON, falling back to a string
    Set { name: String, value: String },
    /// Delete a preference
    Remove { name: String },
    /// List every physical key in the store
    List,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = match cli.store {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default(),
    };
    debug!(path = %store.path().display(), "using store file");

    let lines = commands::run(&cli.command, cli.namespace.as_deref(), Arc::new(store))?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
