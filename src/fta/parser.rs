//! Folds the lexer's line stream into a [`Declarations`] value: a global
//! property bag plus an ordered list of Event/Gate objects with their raw
//! (unvalidated, unresolved) properties.

use std::collections::{HashMap, HashSet};

use super::ast::{Declarations, GlobalProps, RawObject, RawProperty};
use super::error::FtaError;
use super::lexer::{HeaderKind, Lexer, Line};

const EVENT_KEYS: &[&str] = &["label", "comment", "probability", "rate"];
const GATE_KEYS: &[&str] = &["label", "comment", "type", "inputs", "is_paged"];
const GLOBAL_KEYS: &[&str] = &["time_unit"];

pub struct Parser {
    declarations: Declarations,
    seen_ids: HashSet<String>,
    current: Option<usize>,
}

impl Parser {
    pub fn parse(source: &str) -> Result<Declarations, FtaError> {
        let lines = Lexer::new(source).tokenize()?;

        let mut parser = Parser {
            declarations: Declarations::default(),
            seen_ids: HashSet::new(),
            current: None,
        };

        for lexed in lines {
            match lexed.line {
                Line::Blank | Line::Comment => {}
                Line::Header { kind, id } => parser.open_object(kind, id, lexed.line_no)?,
                Line::Property { key, value } => parser.set_property(key, value, lexed.line_no)?,
            }
        }

        Ok(parser.declarations)
    }

    fn open_object(&mut self, kind: HeaderKind, id: String, line: usize) -> Result<(), FtaError> {
        if !self.seen_ids.insert(id.clone()) {
            return Err(FtaError::structure(line, format!("duplicate id: {:?}", id)));
        }

        self.declarations.objects.push(RawObject {
            kind,
            id,
            line,
            properties: HashMap::new(),
        });
        self.current = Some(self.declarations.objects.len() - 1);
        Ok(())
    }

    fn set_property(&mut self, key: String, value: String, line: usize) -> Result<(), FtaError> {
        match self.current {
            None => self.set_global_property(key, value, line),
            Some(idx) => self.set_object_property(idx, key, value, line),
        }
    }

    fn set_global_property(&mut self, key: String, value: String, line: usize) -> Result<(), FtaError> {
        if !GLOBAL_KEYS.contains(&key.as_str()) {
            return Err(FtaError::syntax(line, format!("unrecognised global property: {:?}", key)));
        }

        let GlobalProps { time_unit } = &mut self.declarations.global;
        if time_unit.is_some() {
            return Err(FtaError::value(line, "time_unit set more than once"));
        }
        *time_unit = Some(RawProperty { value, line });
        Ok(())
    }

    fn set_object_property(&mut self, idx: usize, key: String, value: String, line: usize) -> Result<(), FtaError> {
        let object = &mut self.declarations.objects[idx];
        let allowed = match object.kind {
            HeaderKind::Event => EVENT_KEYS,
            HeaderKind::Gate => GATE_KEYS,
        };

        if !allowed.contains(&key.as_str()) {
            return Err(FtaError::syntax(line, format!("unrecognised property {:?} on {:?} {}", key, object.kind, object.id)));
        }

        if object.properties.contains_key(&key) {
            return Err(FtaError::syntax(line, format!("duplicate property {:?} on {}", key, object.id)));
        }

        object.properties.insert(key, RawProperty { value, line });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_and_objects_in_order() {
        let src = "\
- time_unit: h
Event: BF
- rate: 0.1
Gate: G
- type: OR
- inputs: BF
";
        let decls = Parser::parse(src).unwrap();
        assert_eq!(decls.global.time_unit.as_ref().unwrap().value, "h");
        assert_eq!(decls.objects.len(), 2);
        assert_eq!(decls.objects[0].id, "BF");
        assert_eq!(decls.objects[1].id, "G");
    }

    #[test]
    fn duplicate_object_id_is_structure_error() {
        let src = "Event: A\n- probability: 0.1\nEvent: A\n- probability: 0.2\n";
        let err = Parser::parse(src).unwrap_err();
        assert!(matches!(err, FtaError::Structure { .. }));
    }

    #[test]
    fn duplicate_property_is_syntax_error() {
        let src = "Event: A\n- probability: 0.1\n- probability: 0.2\n";
        let err = Parser::parse(src).unwrap_err();
        assert!(matches!(err, FtaError::Syntax { .. }));
    }

    #[test]
    fn unknown_key_is_syntax_error() {
        let src = "Event: A\n- bogus: 1\n";
        let err = Parser::parse(src).unwrap_err();
        assert!(matches!(err, FtaError::Syntax { .. }));
    }

    #[test]
    fn time_unit_set_twice_is_value_error() {
        let src = "- time_unit: h\n- time_unit: yr\nEvent: A\n- probability: 0.1\n";
        let err = Parser::parse(src).unwrap_err();
        assert!(matches!(err, FtaError::Value { .. }));
    }
}
