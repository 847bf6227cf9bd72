//! MarkTeX CLI - Markdown documents with print layout.
//!
//! Provides commands for:
//! - `render`: Render a document to standalone HTML (screen or print)
//! - `layout`: Show computed page-layout parameters or the print stylesheet
//! - `watch`: Re-render a document whenever it changes
//! - `improve`: Rewrite a document with the content-generation assistant

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ImproveArgs, LayoutArgs, RenderArgs, WatchArgs};
use output::Output;

/// MarkTeX - Markdown documents with print layout.
#[derive(Parser)]
#[command(name = "marktex", version, about)]
struct Cli {
    /// Enable verbose output (render warnings and request logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown document to HTML.
    Render(RenderArgs),
    /// Print computed layout parameters.
    Layout(LayoutArgs),
    /// Re-render a document on every change.
    Watch(WatchArgs),
    /// Rewrite a document following an instruction.
    Improve(ImproveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Layout(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
        Commands::Improve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
