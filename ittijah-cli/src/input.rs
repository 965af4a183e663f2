//! Input reading for the CLI commands

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read HTML from a file path, or stdin when no path is given.
pub fn read_html(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read HTML from stdin")?;
            Ok(buffer)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))
}
