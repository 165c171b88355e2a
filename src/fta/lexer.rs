//! Line-oriented lexer for the fault tree text format. Each input line
//! becomes exactly one [`Line`], tagged with its 1-based source line
//! number so downstream errors can point back at it.

use super::error::FtaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    Comment,
    /// `Event: <id>` or `Gate: <id>`
    Header { kind: HeaderKind, id: String },
    /// `- key: value`
    Property { key: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Event,
    Gate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexedLine {
    pub line_no: usize,
    pub line: Line,
}

pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn tokenize(self) -> Result<Vec<LexedLine>, FtaError> {
        let mut lines = Vec::new();

        for (idx, raw) in self.source.lines().enumerate() {
            let line_no = idx + 1;
            let line = Self::classify(raw).map_err(|message| FtaError::syntax(line_no, message))?;
            lines.push(LexedLine { line_no, line });
        }

        Ok(lines)
    }

    fn classify(raw: &str) -> Result<Line, String> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Ok(Line::Blank);
        }

        if trimmed.starts_with('#') {
            return Ok(Line::Comment);
        }

        if let Some(rest) = trimmed.strip_prefix('-') {
            let rest = rest.trim_start();
            let (key, value) = rest
                .split_once(':')
                .ok_or_else(|| format!("malformed property line: {:?}", raw))?;
            let key = key.trim();
            if key.is_empty() || !Self::is_valid_key(key) {
                return Err(format!("invalid property key: {:?}", key));
            }
            return Ok(Line::Property {
                key: key.to_string(),
                value: value.trim().to_string(),
            });
        }

        if let Some(rest) = trimmed.strip_prefix("Event:") {
            let id = Self::read_id(rest)?;
            return Ok(Line::Header { kind: HeaderKind::Event, id });
        }

        if let Some(rest) = trimmed.strip_prefix("Gate:") {
            let id = Self::read_id(rest)?;
            return Ok(Line::Header { kind: HeaderKind::Gate, id });
        }

        Err(format!("unrecognised line: {:?}", raw))
    }

    fn read_id(rest: &str) -> Result<String, String> {
        let id = rest.trim();
        if id.is_empty() {
            return Err("object header is missing an id".to_string());
        }
        if id.contains(',') {
            return Err(format!("identifier {:?} may not contain a comma", id));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(format!("identifier {:?} may not contain whitespace", id));
        }
        Ok(id.to_string())
    }

    fn is_valid_key(key: &str) -> bool {
        let mut chars = key.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_event_block() {
        let src = "Event: BF\n- rate: 0.1\n- label: Battery fails\n";
        let lines = Lexer::new(src).tokenize().unwrap();

        assert_eq!(
            lines[0].line,
            Line::Header { kind: HeaderKind::Event, id: "BF".to_string() }
        );
        assert_eq!(
            lines[1].line,
            Line::Property { key: "rate".to_string(), value: "0.1".to_string() }
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped_semantically() {
        let src = "\n  \n# a comment\nGate: G\n- type: OR\n- inputs: A, B\n";
        let lines = Lexer::new(src).tokenize().unwrap();
        assert_eq!(lines[0].line, Line::Blank);
        assert_eq!(lines[1].line, Line::Blank);
        assert_eq!(lines[2].line, Line::Comment);
    }

    #[test]
    fn malformed_property_line_is_a_syntax_error() {
        let src = "- no colon here\n";
        let err = Lexer::new(src).tokenize().unwrap_err();
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn header_with_comma_in_id_is_rejected() {
        let src = "Event: A,B\n";
        let err = Lexer::new(src).tokenize().unwrap_err();
        assert_eq!(err.line(), 1);
    }
}
