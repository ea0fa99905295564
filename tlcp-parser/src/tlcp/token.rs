//! Token definitions for the tlcp format
//!
//!     Tokens are produced by a logos lexer. Whitespace and TLC comments (`\*` line
//!     comments and `(* *)` block comments) are skipped, so the token stream only
//!     carries directives and the words of plain TLC statements.
//!
//!     Every token is paired with the byte range of its source text. The parser relies
//!     on these ranges to slice passthrough statements out of the original source, so
//!     they must never be adjusted after lexing.
//!
//! Directive Tokens
//!
//!     `#FAMILIES`, `#FAMILY`, `#ONEOF`, `#ONEOF_SUBFOLDERS`, `#OPTION` and `#END`. Any
//!     other `#`-prefixed upper case word lexes as [Token::UnknownDirective] so the
//!     parser can reject it with a precise message.
//!
//! Plain Tokens
//!
//!     Identifiers, numbers, strings, punctuation and single-character symbols. The
//!     parser treats all of these as opaque passthrough material, except that
//!     identifiers spelling a TLC keyword start a new passthrough statement.

use super::error::SyntaxError;
use logos::{FilterResult, Lexer, Logos};
use std::fmt;
use std::ops::Range;

/// Keywords that open a statement in TLC configuration syntax.
pub const TLC_KEYWORDS: &[&str] = &[
    "CONSTANT",
    "CONSTANTS",
    "INIT",
    "NEXT",
    "SPECIFICATION",
    "INVARIANT",
    "INVARIANTS",
    "PROPERTY",
    "PROPERTIES",
    "SYMMETRY",
    "VIEW",
    "CONSTRAINT",
    "CONSTRAINTS",
    "ACTION_CONSTRAINT",
    "ACTION_CONSTRAINTS",
    "CHECK_DEADLOCK",
    "POSTCONDITION",
    "ALIAS",
];

/// All possible tokens in the tlcp format
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"\\\*[^\n]*")]
pub enum Token {
    #[token("#FAMILIES")]
    Families,
    #[token("#FAMILY")]
    Family,
    #[token("#ONEOF")]
    OneOf,
    #[token("#ONEOF_SUBFOLDERS")]
    OneOfSubfolders,
    #[token("#OPTION")]
    OptionStart,
    #[token("#END")]
    End,
    #[regex(r"#[A-Z][A-Z_]*", |lex| lex.slice().to_string())]
    UnknownDirective(String),

    /// `(* ... *)` comment. Never emitted: the callback skips it, or reports it as
    /// unrecognized input when the closing `*)` is missing.
    #[token("(*", block_comment)]
    BlockComment,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(",")]
    Comma,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    Str(String),
    // Catch-all for operators and punctuation TLC values may contain
    #[regex(r#"[^\sA-Za-z0-9_(),"]"#, |lex| lex.slice().to_string())]
    Symbol(String),
}

fn block_comment(lex: &mut Lexer<Token>) -> FilterResult<(), ()> {
    match lex.remainder().find("*)") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

impl Token {
    /// Check if this token is one of the tlcp directives
    pub fn is_directive(&self) -> bool {
        matches!(
            self,
            Token::Families
                | Token::Family
                | Token::OneOf
                | Token::OneOfSubfolders
                | Token::OptionStart
                | Token::End
                | Token::UnknownDirective(_)
        )
    }

    /// Check if this token opens a TLC statement
    pub fn is_tlc_keyword(&self) -> bool {
        match self {
            Token::Ident(word) => TLC_KEYWORDS.contains(&word.as_str()),
            _ => false,
        }
    }

    /// Check if this token can be part of a passthrough statement
    pub fn is_plain(&self) -> bool {
        !self.is_directive()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Families => write!(f, "#FAMILIES"),
            Token::Family => write!(f, "#FAMILY"),
            Token::OneOf => write!(f, "#ONEOF"),
            Token::OneOfSubfolders => write!(f, "#ONEOF_SUBFOLDERS"),
            Token::OptionStart => write!(f, "#OPTION"),
            Token::End => write!(f, "#END"),
            Token::BlockComment => write!(f, "(*"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::UnknownDirective(text)
            | Token::Ident(text)
            | Token::Number(text)
            | Token::Str(text)
            | Token::Symbol(text) => write!(f, "{}", text),
        }
    }
}

/// Tokenize source text with location information
///
/// Returns every token paired with its byte range, or one [SyntaxError] per span of
/// input the lexer could not recognise.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, Vec<SyntaxError>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) if lexer.slice().starts_with("(*") => {
                errors.push(SyntaxError::new("unterminated comment", span))
            }
            Err(()) => errors.push(SyntaxError::new(
                format!("unrecognized input '{}'", lexer.slice()),
                span,
            )),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
