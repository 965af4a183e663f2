//! ittijah command-line entry point

use clap::{Parser, Subcommand};
use ittijah_cli::commands::{AnalyzeArgs, AnnotateArgs};

#[derive(Parser)]
#[command(
    name = "ittijah",
    version,
    about = "Detect Arabic text in HTML and annotate direction attributes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate an HTML document with direction attributes
    Annotate(AnnotateArgs),
    /// Report per-element direction verdicts as JSON
    Analyze(AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Annotate(args) => args.execute(),
        Commands::Analyze(args) => args.execute(),
    }
}
