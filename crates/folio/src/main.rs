//! Folio CLI - rich-text document renderer.
//!
//! Provides commands for:
//! - `render`: Render an editor JSON document to sanitized HTML
//! - `check-url`: Show how a URL is sanitized and resolved as a video embed

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckUrlArgs, RenderArgs};
use output::Output;

/// Folio - sanitizing renderer for rich-text editor documents.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an editor JSON document to HTML.
    Render(RenderArgs),
    /// Sanitize a URL and resolve its video embed.
    CheckUrl(CheckUrlArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr so rendered HTML on stdout stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::CheckUrl(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
