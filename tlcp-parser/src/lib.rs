//! # tlcp-parser
//!
//! Lexer and parser for `.meta.cfg` files: TLC model configurations extended with
//! directives that describe a family of related configurations.
//!
//! File Layout
//!
//! src/tlcp
//!   ├── token       logos token definitions and tokenization
//!   ├── parsing     chumsky grammar producing the document tree
//!   ├── ast         document tree nodes
//!   ├── location    byte offset to line:column conversion
//!   ├── error       syntax errors shared by lexing and parsing
//!   └── loader      loading sources from files or strings
//!
//! The parser never interprets TLC syntax. Plain configuration statements are kept
//! as opaque passthrough text sliced straight from the source.

pub mod tlcp;
