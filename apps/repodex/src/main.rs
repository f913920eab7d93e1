//! # repodex - curated repository list generator
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/repodex (THE BINARY)               │
//! │                                                          │
//! │  ┌─────────────┐    ┌──────────────┐    ┌────────────┐  │
//! │  │    CLI      │    │ GitHub client│    │  config +  │  │
//! │  │   (clap)    │    │  (reqwest)   │    │  file I/O  │  │
//! │  └──────┬──────┘    └──────┬───────┘    └─────┬──────┘  │
//! │         └──────────────────┼──────────────────┘         │
//! │                            ▼                            │
//! │                    ┌───────────────┐                    │
//! │                    │ repodex-core  │                    │
//! │                    │  (THE LOGIC)  │                    │
//! │                    └───────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_...
//! repodex collect --txt repos.txt -v
//! repodex render --no-star
//! repodex render --combined --author
//! repodex inspect --id 480281047
//! ```

use clap::Parser;
use repodex::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // A .env file next to the input list is optional.
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing — REPODEX_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("REPODEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "repodex=debug,repodex_core=debug"
    } else {
        "repodex=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
