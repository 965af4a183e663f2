//! Analyze command implementation

use super::init_logging;
use crate::input::read_html;
use anyhow::Result;
use clap::Args;
use ittijah_dom::Document;
use ittijah_engine::{report, ElementReport, PolicyConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input HTML file (default: stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// JSON report wrapper with totals.
#[derive(Debug, Serialize)]
struct AnalysisReport {
    elements: Vec<ElementReport>,
    total: usize,
    rtl: usize,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let html = read_html(self.input.as_ref())?;
        let doc = Document::parse(&html);
        let elements = report(&doc, &PolicyConfig::default());

        let rtl = elements.iter().filter(|e| e.verdict.is_rtl()).count();
        let output = AnalysisReport {
            total: elements.len(),
            rtl,
            elements,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
