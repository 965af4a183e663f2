//! CLI command implementations

mod analyze;
mod annotate;

pub use analyze::AnalyzeArgs;
pub use annotate::AnnotateArgs;

use ittijah_engine::Mode;

/// Engine mode selector exposed on the command line.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Per-element heuristic classification
    Heuristic,
    /// Mark only the document root rtl
    ForceDocument,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Heuristic => Mode::Heuristic,
            ModeArg::ForceDocument => Mode::ForceDocument,
        }
    }
}

/// Initialize logging from a verbosity count.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}
