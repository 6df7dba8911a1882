//! # Kumihimo - Pattern Designer
//!
//! The main binary for the Kumihimo braid pattern designer.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for validating, solving and rendering designs
//! - HTTP bridge to the external knot solver
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     apps/kumihimo (THE BINARY)                  │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐    │
//! │  │   CLI       │    │   HTTP API  │    │  Solver Client   │    │
//! │  │  (clap)     │    │   (axum)    │    │   (reqwest)      │───────▶ solver
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘    │
//! │         │                  │                    │               │
//! │         └──────────────────┼────────────────────┘               │
//! │                            ▼                                    │
//! │                   ┌────────────────┐                            │
//! │                   │ kumihimo-core  │                            │
//! │                   │  (THE LOGIC)   │                            │
//! │                   └────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! kumihimo server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! kumihimo layout --strands 6 --rows 4
//! kumihimo validate -f design.json
//! kumihimo solve -f design.json
//! kumihimo render -f reply.json -d design.json
//! ```

use clap::Parser;
use kumihimo::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // KUMIHIMO_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("KUMIHIMO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kumihimo=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Kumihimo Pattern Designer v{}

  Knot patterns, solved and drawn
"#,
        env!("CARGO_PKG_VERSION")
    );
}
