pub mod cli;
pub mod fta;

pub use fta::{parse, AnalysisReport, FaultTree, FtaError};
