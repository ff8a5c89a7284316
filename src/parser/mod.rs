//! Parser module — documentation comments to `DocBlock`s.

pub mod context;
pub mod jsdoc;

use crate::model::DocBlock;

pub use jsdoc::JsDocParser;

/// Turns raw source text into its documentation blocks, in source order.
pub trait CommentParser {
    fn parse(&self, source: &str) -> Result<Vec<DocBlock>, ParseError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated block comment opened at line {line}")]
    UnterminatedComment { line: usize },
}
