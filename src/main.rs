use std::process;

use clap::Parser;
use sfta::cli::{Cli, CliRunner};

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let runner = CliRunner::new(&cli);

    if let Err(e) = runner.run(cli.input) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
