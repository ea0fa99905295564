//! Document loading utilities
//!
//! `DocumentLoader` loads source text from a file or a string and parses it. It keeps
//! the source around after parsing because diagnostics need it to turn byte spans into
//! line:column positions.
//!
//! # Example
//!
//! ```rust
//! use tlcp_parser::tlcp::loader::DocumentLoader;
//!
//! let loader = DocumentLoader::from_path("spec.meta.cfg")?;
//! let doc = loader.parse()?;
//! ```

use super::ast::Document;
use super::error::SyntaxError;
use super::location::SourceLocation;
use super::parsing::parse_document;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error that can occur when loading documents
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read '{path}': {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} syntax error(s)", .0.len())]
    Syntax(Vec<SyntaxError>),
}

/// Source text with parsing shortcuts
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Parse the source into a [Document]
    pub fn parse(&self) -> Result<Document, LoaderError> {
        parse_document(&self.source).map_err(LoaderError::Syntax)
    }

    /// Position lookup table for this source
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(&self.source)
    }
}
