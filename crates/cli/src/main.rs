//! Corner Shop CLI - Database setup and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the accounts table in the configured database
//! cs-cli migrate
//!
//! # Create it in a specific database file
//! cs-cli migrate --db-path ./users.db
//!
//! # Replay a cart script, persisting to ./cart-data/cart.json
//! cs-cli cart --store ./cart-data session.txt
//!
//! # Or read commands from stdin
//! printf 'add Widget 19.99\nadd Gadget 5\nremove 0\n' | cs-cli cart --store ./cart-data
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the storefront schema
//! - `cart` - Drive a cart through `add`/`remove` commands and print the result

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(version, about = "Corner Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the storefront database schema
    Migrate {
        /// SQLite database path (defaults to `STOREFRONT_DB_PATH`)
        #[arg(long)]
        db_path: Option<String>,
    },
    /// Replay cart commands and print the resulting cart
    Cart {
        /// Directory the cart snapshot is written to
        #[arg(short, long, default_value = "cart-data")]
        store: PathBuf,

        /// Print the rendered list HTML instead of plain rows
        #[arg(long)]
        html: bool,

        /// Script with one command per line (reads stdin when omitted)
        script: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { db_path } => commands::migrate::storefront(db_path).await?,
        Commands::Cart {
            store,
            html,
            script,
        } => commands::cart::replay(store, script.as_deref(), html)?,
    }
    Ok(())
}
