//! # ogw CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ogw_cli::catalog::{run_catalogs, run_controls, run_show, ControlsArgs, ShowArgs};
use ogw_cli::diff::{run_diff, DiffArgs};
use ogw_cli::normalize::{run_normalize, NormalizeArgs};

/// OSCAL workbench CLI
///
/// Inspect and maintain the catalog files served by the workbench API.
#[derive(Parser, Debug)]
#[command(name = "ogw", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the privacy and security OSCAL repositories.
    /// Defaults to `OGW_DATA_DIR` and the per-root overrides.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List configured catalogs and whether their files exist.
    Catalogs,

    /// List the controls of one catalog view.
    Controls(ControlsArgs),

    /// Show one control in full.
    Show(ShowArgs),

    /// Structural diff of two JSON files.
    Diff(DiffArgs),

    /// Rewrite a catalog file in canonical formatting.
    Normalize(NormalizeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ogw_cli::store_config(cli.data_dir.as_deref());
    tracing::debug!(?config, "resolved catalog table");

    let result = match cli.command {
        Commands::Catalogs => run_catalogs(&config),
        Commands::Controls(args) => run_controls(&args, &config),
        Commands::Show(args) => run_show(&args, &config),
        Commands::Diff(args) => run_diff(&args),
        Commands::Normalize(args) => run_normalize(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
