//! Coherent fault tree analysis core: parses the declarative text format,
//! validates and builds a [`model::FaultTree`], and answers minimal-cut-set
//! and quantity queries against it.
//!
//! Pipeline: [`lexer`] -> [`parser`] -> [`builder`] -> [`model::FaultTree`].
//! [`mcs`] and [`quantity`] are the algorithms the tree's query methods
//! delegate to; [`report`] turns a built tree into the pure, serializable
//! result model that CLI and renderer collaborators consume.

pub mod ast;
pub mod builder;
pub mod error;
pub mod lexer;
pub mod mask;
pub mod mcs;
pub mod model;
pub mod parser;
pub mod quantity;
pub mod report;

pub use error::FtaError;
pub use mask::{CutSet, EventMask};
pub use model::{Dimension, Event, FaultTree, Gate, GateType, NodeRef, Quantity};
pub use report::{build_report, AnalysisReport};

/// Parses and validates `source`, producing a ready-to-query [`FaultTree`].
pub fn parse(source: &str) -> Result<FaultTree, FtaError> {
    let declarations = parser::Parser::parse(source)?;
    builder::build(declarations)
}
