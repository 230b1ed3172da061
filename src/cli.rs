//! Command-line interface for the `brainvita` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

/// Brainvita - peg solitaire in the terminal
#[derive(Parser, Debug)]
#[command(name = "brainvita")]
#[command(about = "Peg solitaire (Brainvita) in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(long, env = "BRAINVITA_CONFIG", default_value = "brainvita.toml")]
    pub config: PathBuf,

    /// Layout to deal first, overriding the config file
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Start with destination hints hidden
    #[arg(long)]
    pub no_hints: bool,

    /// Append tracing output to this file
    #[arg(long, env = "BRAINVITA_LOG")]
    pub log_file: Option<PathBuf>,

    /// Print the available layouts and exit
    #[arg(long)]
    pub list_layouts: bool,
}

impl Cli {
    /// Fold command-line overrides into a loaded config.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(layout) = &self.layout {
            config.layout = layout.clone();
        }
        if self.no_hints {
            config.hints = false;
        }
    }
}
