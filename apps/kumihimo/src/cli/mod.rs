//! # Kumihimo CLI Module
//!
//! This module implements the CLI interface for Kumihimo.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `palette` - List the strand colors
//! - `layout` - Show how many knots each row takes
//! - `validate` - Check a design file
//! - `solve` - Validate a design, call the solver and print the diagram
//! - `render` - Build a diagram from a saved solver reply

mod commands;

use crate::config::Config;
use clap::{Args, Parser, Subcommand};
use kumihimo_core::KumihimoError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Kumihimo - braided bracelet pattern designer
///
/// Validates knot patterns, sends them to a solver and draws the braid.
#[derive(Parser, Debug)]
#[command(name = "kumihimo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List palette colors
    Palette,

    /// Show the expected knots per row
    Layout {
        /// Strand count (4, 6, 8, 10 or 12)
        #[arg(short, long, default_value = "4")]
        strands: usize,

        /// Number of rows to show
        #[arg(short, long, default_value = "4")]
        rows: usize,
    },

    /// Validate a design
    Validate {
        /// Path to the design (JSON)
        #[arg(short, long, conflicts_with = "start", required_unless_present = "start")]
        file: Option<PathBuf>,

        #[command(flatten)]
        inline: InlineDesign,
    },

    /// Solve a design and print its diagram
    Solve {
        /// Path to the design (JSON)
        #[arg(short, long, conflicts_with = "start", required_unless_present = "start")]
        file: Option<PathBuf>,

        #[command(flatten)]
        inline: InlineDesign,
    },

    /// Build a diagram from a saved solver reply
    Render {
        /// Path to the solver reply (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the design the reply answers (JSON)
        #[arg(short, long)]
        design: PathBuf,
    },
}

/// A design typed on the command line as color letters.
///
/// `--start RGBY --row GY --row Y` is the four-strand sample design;
/// `_` marks an unassigned slot.
#[derive(Args, Debug, Default, Clone)]
pub struct InlineDesign {
    /// Start colors, one letter per strand
    #[arg(long)]
    pub start: Option<String>,

    /// One target row, one letter per knot (repeatable)
    #[arg(long = "row")]
    pub rows: Vec<String>,

    /// Strand count (defaults to the number of start colors)
    #[arg(long)]
    pub strands: Option<usize>,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), KumihimoError> {
    let config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::info!("Solver: {}", config.solver.base_url);
    }

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(config, host, port).await,
        Some(Commands::Palette) => cmd_palette(json_mode),
        Some(Commands::Layout { strands, rows }) => cmd_layout(strands, rows, json_mode),
        Some(Commands::Validate { file, inline }) => {
            cmd_validate(file.as_deref(), &inline, json_mode)
        }
        Some(Commands::Solve { file, inline }) => {
            cmd_solve(&config, file.as_deref(), &inline, json_mode).await
        }
        Some(Commands::Render { file, design }) => cmd_render(&file, &design, json_mode),
        // No subcommand - show the palette by default
        None => cmd_palette(json_mode),
    }
}
