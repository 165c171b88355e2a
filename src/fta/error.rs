use thiserror::Error;

/// A single fatal diagnostic. Parsing and validation are fail-fast: the
/// first error encountered stops processing, so callers only ever see one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FtaError {
    #[error("line {line}: syntax error: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: value error: {message}")]
    Value { line: usize, message: String },

    #[error("line {line}: reference error: {message}")]
    Reference { line: usize, message: String },

    #[error("line {line}: structure error: {message}")]
    Structure { line: usize, message: String },
}

impl FtaError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        FtaError::Syntax { line, message: message.into() }
    }

    pub fn value(line: usize, message: impl Into<String>) -> Self {
        FtaError::Value { line, message: message.into() }
    }

    pub fn reference(line: usize, message: impl Into<String>) -> Self {
        FtaError::Reference { line, message: message.into() }
    }

    pub fn structure(line: usize, message: impl Into<String>) -> Self {
        FtaError::Structure { line, message: message.into() }
    }

    /// The source line this diagnostic is anchored to (or 1 for whole-document errors).
    pub fn line(&self) -> usize {
        match self {
            FtaError::Syntax { line, .. }
            | FtaError::Value { line, .. }
            | FtaError::Reference { line, .. }
            | FtaError::Structure { line, .. } => *line,
        }
    }
}
