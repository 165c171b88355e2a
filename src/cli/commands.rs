use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::fta::{self, FtaError};

/// `sfta <ft.txt>`: parse, validate, and analyse one fault tree file,
/// writing the result model to `{ft.txt}.out/report.json`.
pub struct AnalyzeCommand {
    pub input: PathBuf,
    pub verbose: bool,
}

impl AnalyzeCommand {
    pub fn execute(&self) -> Result<(), CommandError> {
        if !self.input.exists() {
            return Err(CommandError::FileNotFound(self.input.clone()));
        }

        let source = fs::read_to_string(&self.input)?;
        let tree = fta::parse(&source)
            .map_err(|err| CommandError::Analysis(self.input.display().to_string(), err))?;
        let report = fta::build_report(&tree);

        let out_dir = output_dir(&self.input);
        fs::create_dir_all(&out_dir)?;
        let report_path = out_dir.join("report.json");
        fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;

        if self.verbose {
            info!(events = report.events.len(), gates = report.gates.len(), "analysis complete");
        }

        println!("✓ analysed {}", self.input.display());
        println!("  top gates: {}", report.top_gate_ids.join(", "));
        println!("  output: {}", report_path.display());

        Ok(())
    }
}

fn output_dir(input: &Path) -> PathBuf {
    let mut name = input.file_name().map(|n| n.to_owned()).unwrap_or_default();
    name.push(".out");
    input.with_file_name(name)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0}: {1}")]
    Analysis(String, #[source] FtaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_a_command_error() {
        let cmd = AnalyzeCommand { input: PathBuf::from("/nonexistent/does-not-exist.txt"), verbose: false };
        assert!(matches!(cmd.execute(), Err(CommandError::FileNotFound(_))));
    }

    #[test]
    fn valid_file_writes_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tree.txt");
        let mut file = fs::File::create(&input).unwrap();
        write!(file, "Event: A\n- probability: 0.5\nGate: G\n- type: OR\n- inputs: A\n").unwrap();

        let cmd = AnalyzeCommand { input: input.clone(), verbose: false };
        cmd.execute().unwrap();

        let report_path = output_dir(&input).join("report.json");
        assert!(report_path.exists());
    }

    #[test]
    fn invalid_file_names_the_offending_line() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tree.txt");
        fs::write(&input, "Event: A\n- probability: 2.0\n").unwrap();

        let cmd = AnalyzeCommand { input, verbose: false };
        let err = cmd.execute().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
