//! CLI surface: `sfta [-h] [-v] <ft.txt>`. A thin collaborator over
//! [`crate::fta`] — it owns argument parsing, exit status, and where the
//! result model gets written; the core crate has no opinion on any of that.

pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use commands::{AnalyzeCommand, CommandError};

#[derive(Parser)]
#[clap(name = "sfta")]
#[clap(author, version, about = "Coherent fault tree analyser", long_about = None)]
pub struct Cli {
    /// Path to a fault tree declaration file.
    pub input: PathBuf,

    #[clap(short, long, global = true)]
    pub verbose: bool,
}

pub struct CliRunner {
    verbose: bool,
}

impl CliRunner {
    pub fn new(cli: &Cli) -> Self {
        Self { verbose: cli.verbose }
    }

    pub fn run(&self, input: PathBuf) -> Result<(), CommandError> {
        AnalyzeCommand { input, verbose: self.verbose }.execute()
    }
}
