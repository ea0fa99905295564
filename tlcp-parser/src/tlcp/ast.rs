//! Document tree for `.meta.cfg` sources
//!
//! The tree is a closed set of node kinds. Consumers walk it with exhaustive
//! `match`es, so adding a node kind is a compile error everywhere it is not handled.
//!
//! Statement order inside a [Block] is document order, and it is significant:
//! it determines both the order of generated variants and the order name segments
//! are joined in.
//!
//! Every node keeps the byte range it was parsed from so later stages can report
//! errors against the source.

use std::ops::Range;

/// A parsed source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Every `#FAMILIES(...)` declaration, in source order. More than one is
    /// representable so that the expansion stage can reject it.
    pub families: Vec<FamiliesDecl>,
    pub block: Block,
}

impl Document {
    pub fn new(families: Vec<FamiliesDecl>, block: Block) -> Self {
        Self { families, block }
    }
}

/// A `#FAMILIES(A, B, ...)` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamiliesDecl {
    pub names: Vec<Name>,
    pub span: Range<usize>,
}

/// An identifier together with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub span: Range<usize>,
}

impl Name {
    pub fn new(text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// An ordered sequence of statements
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    FamilyScoped(FamilyScoped),
    OneOf(OneOf),
    Passthrough(Passthrough),
}

/// `#FAMILY(A, ...) statement`, or `#FAMILY statement` for all families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyScoped {
    /// `None` when the statement names no families and applies to every family
    pub families: Option<Vec<Name>>,
    pub inner: Box<Statement>,
    pub span: Range<usize>,
}

/// `#ONEOF` / `#ONEOF_SUBFOLDERS` choice point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    pub with_subfolders: bool,
    pub options: Vec<OptionItem>,
    pub span: Range<usize>,
}

/// One `#OPTION name` branch of a choice point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub name: Name,
    pub body: Block,
}

/// Plain TLC configuration text, copied verbatim into every variant that reaches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passthrough {
    /// Exact source slice covered by the statement's tokens
    pub text: String,
    pub span: Range<usize>,
}
