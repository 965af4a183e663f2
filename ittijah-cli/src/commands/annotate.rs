//! Annotate command implementation

use super::{init_logging, ModeArg};
use crate::input::read_html;
use anyhow::{Context, Result};
use clap::Args;
use ittijah_dom::Document;
use ittijah_engine::{DirectionEngine, EngineConfig};
use std::path::PathBuf;

/// Arguments for the annotate command
#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Input HTML file (default: stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Engine mode
    #[arg(short, long, value_enum, default_value = "heuristic")]
    pub mode: ModeArg,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AnnotateArgs {
    /// Execute the annotate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::info!("annotating {:?}", self.input);

        let html = read_html(self.input.as_ref())?;
        let mut doc = Document::parse(&html);

        let mut engine = DirectionEngine::new(EngineConfig {
            mode: self.mode.into(),
            ..Default::default()
        });
        engine.attach(&mut doc);

        let annotated = doc.to_html();
        match &self.output {
            Some(path) => std::fs::write(path, annotated)
                .with_context(|| format!("failed to write output file: {}", path.display()))?,
            None => println!("{annotated}"),
        }
        Ok(())
    }
}
