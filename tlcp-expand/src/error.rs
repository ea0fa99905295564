//! Validation errors raised while expanding a document

use std::ops::Range;
use thiserror::Error;

/// A document that parsed but cannot be expanded
///
/// Every variant is fatal for the document: nothing is produced for it. Each carries
/// the byte span of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("multiple #FAMILIES(...) declarations are not allowed")]
    MultipleFamiliesDeclarations { span: Range<usize> },

    #[error("family name '{name}' contains prohibited symbol '_'")]
    IllegalFamilyName { name: String, span: Range<usize> },

    #[error("family '{name}' is declared more than once")]
    DuplicateFamily { name: String, span: Range<usize> },

    #[error("option name '{name}' contains prohibited symbol '_'")]
    IllegalOptionName { name: String, span: Range<usize> },

    #[error("unknown family '{name}'")]
    UnknownFamily { name: String, span: Range<usize> },
}

impl ExpandError {
    pub fn span(&self) -> Range<usize> {
        match self {
            ExpandError::MultipleFamiliesDeclarations { span }
            | ExpandError::IllegalFamilyName { span, .. }
            | ExpandError::DuplicateFamily { span, .. }
            | ExpandError::IllegalOptionName { span, .. }
            | ExpandError::UnknownFamily { span, .. } => span.clone(),
        }
    }
}
