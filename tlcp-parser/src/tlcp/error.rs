//! Syntax errors produced while lexing or parsing a source file

use super::location::{Position, SourceLocation};
use std::ops::Range;
use thiserror::Error;

/// A syntax error with the byte range it was detected at
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Range<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Line:column position of the start of the error
    pub fn position(&self, location: &SourceLocation) -> Position {
        location.byte_to_position(self.span.start)
    }
}
