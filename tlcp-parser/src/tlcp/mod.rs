//! Main module for tlcp parsing functionality

pub mod ast;
pub mod error;
pub mod loader;
pub mod location;
pub mod parsing;
pub mod token;

pub use ast::{Block, Document, FamiliesDecl, FamilyScoped, Name, OneOf, OptionItem, Passthrough, Statement};
pub use error::SyntaxError;
pub use loader::{DocumentLoader, LoaderError};
pub use location::{Position, SourceLocation};
pub use parsing::parse_document;
pub use token::{tokenize, Token};
