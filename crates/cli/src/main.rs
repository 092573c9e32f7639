//! Orbit CLI - command-line client for Azure Cosmos DB.
//!
//! Subcommands are grouped by resource: `containers`, `items`, and `query`.
//! Global flags select JSON output and skip confirmation prompts.

mod commands;
mod confirm;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use commands::{ContainersCommand, ItemsCommand, QueryCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orbit", author, version, about = "Orbit CLI for Azure Cosmos DB")]
struct Cli {
    /// Emit machine-readable JSON instead of table formatting.
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts for mutation operations.
    #[arg(long, global = true)]
    yes: bool,

    /// Log filter (e.g. warn, orbit=debug)
    #[arg(long, default_value = "warn", env = "ORBIT_LOG", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage containers in the configured database
    Containers(ContainersCommand),
    /// Manage items within a container
    Items(ItemsCommand),
    /// Execute a SQL query against a container
    Query(QueryCommand),
}

/// Global flags shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub json: bool,
    pub yes: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let ctx = Context {
        json: cli.json,
        yes: cli.yes,
    };

    let runtime = tokio::runtime::Runtime::new().expect("failed to start async runtime");
    let result = runtime.block_on(async {
        match cli.command {
            Commands::Containers(cmd) => cmd.run(&ctx).await,
            Commands::Items(cmd) => cmd.run(&ctx).await,
            Commands::Query(cmd) => cmd.run(&ctx).await,
        }
    });

    if let Err(err) = result {
        // "{:#}" prints the whole cause chain on one line.
        eprintln!("{err:#}");
        for line in commands::guidance(&err) {
            eprintln!("{line}");
        }
        std::process::exit(1);
    }
}
