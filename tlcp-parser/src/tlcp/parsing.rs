//! Parser for the tlcp format using chumsky
//!
//!     The parser runs over the logos token stream and produces a [Document]. Tokens
//!     are fed to chumsky as a [Stream] keyed by byte ranges, so every span reported by
//!     the parser (node spans and error spans alike) is a byte range into the source.
//!
//! Grammar
//!
//!     document      := (families_decl | statement)* EOF
//!     families_decl := "#FAMILIES" name_list
//!     name_list     := "(" IDENT ("," IDENT)* ")"
//!     statement     := family_scoped | one_of | passthrough
//!     family_scoped := "#FAMILY" name_list? statement
//!     one_of        := ("#ONEOF" | "#ONEOF_SUBFOLDERS") option+ "#END"
//!     option        := "#OPTION" IDENT statement*
//!     passthrough   := plain_token (plain_token - tlc_keyword)*
//!
//! Passthrough Statements
//!
//!     TLC syntax is not interpreted. A passthrough starts at any plain token and runs
//!     until the next directive or the next TLC keyword, so `INIT Init NEXT Next` is two
//!     statements while `foo = 1` is one. Its text is the source slice between the
//!     first and last token, which keeps spacing and inner comments untouched.

use super::ast::{
    Block, Document, FamiliesDecl, FamilyScoped, Name, OneOf, OptionItem, Passthrough, Statement,
};
use super::error::SyntaxError;
use super::token::{tokenize, Token};
use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::Stream;
use std::ops::Range;

/// Type alias for parser error
type ParserError = Simple<Token>;

enum TopLevel {
    Families(FamiliesDecl),
    Statement(Statement),
}

fn name() -> impl Parser<Token, Name, Error = ParserError> + Clone {
    select! { Token::Ident(text) => text }.map_with_span(|text, span| Name::new(text, span))
}

fn name_list() -> impl Parser<Token, Vec<Name>, Error = ParserError> + Clone {
    name()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .delimited_by(just(Token::OpenParen), just(Token::CloseParen))
}

fn families_decl() -> impl Parser<Token, FamiliesDecl, Error = ParserError> + Clone {
    just(Token::Families)
        .ignore_then(name_list())
        .map_with_span(|names, span| FamiliesDecl { names, span })
}

fn passthrough(source: &str) -> impl Parser<Token, Passthrough, Error = ParserError> + Clone + '_ {
    // Punctuation never opens a statement; this keeps `#FAMILY(A B)` a syntax error
    // rather than an unscoped statement reading "(A B)".
    let first = filter(|token: &Token| {
        matches!(
            token,
            Token::Ident(_) | Token::Number(_) | Token::Str(_) | Token::Symbol(_)
        )
    });
    let rest = filter(|token: &Token| token.is_plain() && !token.is_tlc_keyword());

    first
        .then(rest.repeated())
        .map_with_span(move |_, span: Range<usize>| Passthrough {
            text: source[span.clone()].to_string(),
            span,
        })
}

fn statement(source: &str) -> impl Parser<Token, Statement, Error = ParserError> + Clone + '_ {
    recursive(|statement| {
        let block = statement.clone().repeated().map(Block::new);

        let option = just(Token::OptionStart)
            .ignore_then(name())
            .then(block)
            .map(|(name, body)| OptionItem { name, body });

        let one_of = just(Token::OneOf)
            .to(false)
            .or(just(Token::OneOfSubfolders).to(true))
            .then(option.repeated().at_least(1))
            .then_ignore(just(Token::End))
            .map_with_span(|(with_subfolders, options), span| {
                Statement::OneOf(OneOf {
                    with_subfolders,
                    options,
                    span,
                })
            });

        let family_scoped = just(Token::Family)
            .ignore_then(name_list().or_not())
            .then(statement)
            .map_with_span(|(families, inner), span| {
                Statement::FamilyScoped(FamilyScoped {
                    families,
                    inner: Box::new(inner),
                    span,
                })
            });

        choice((
            family_scoped,
            one_of,
            passthrough(source).map(Statement::Passthrough),
        ))
    })
}

fn document(source: &str) -> impl Parser<Token, Document, Error = ParserError> + '_ {
    families_decl()
        .map(TopLevel::Families)
        .or(statement(source).map(TopLevel::Statement))
        .repeated()
        .then_ignore(end())
        .map(|items| {
            let mut families = Vec::new();
            let mut statements = Vec::new();
            for item in items {
                match item {
                    TopLevel::Families(decl) => families.push(decl),
                    TopLevel::Statement(statement) => statements.push(statement),
                }
            }
            Document::new(families, Block::new(statements))
        })
}

/// Parse source text into a [Document]
///
/// Lexing errors are reported first; if the source lexes cleanly, unknown directives
/// and then grammar errors are reported. All errors carry byte spans.
pub fn parse_document(source: &str) -> Result<Document, Vec<SyntaxError>> {
    let tokens = tokenize(source)?;

    let unknown: Vec<SyntaxError> = tokens
        .iter()
        .filter_map(|(token, span)| match token {
            Token::UnknownDirective(directive) => Some(SyntaxError::new(
                format!("unknown directive '{}'", directive),
                span.clone(),
            )),
            _ => None,
        })
        .collect();
    if !unknown.is_empty() {
        return Err(unknown);
    }

    let eoi = source.len()..source.len();
    document(source)
        .parse(Stream::from_iter(eoi, tokens.into_iter()))
        .map_err(|errors| errors.into_iter().map(convert_error).collect())
}

fn convert_error(error: ParserError) -> SyntaxError {
    let found = error
        .found()
        .map(|token| format!("'{}'", token))
        .unwrap_or_else(|| "end of input".to_string());

    let message = match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unclosed { delimiter, .. } => {
            format!("unclosed delimiter '{}'", delimiter)
        }
        SimpleReason::Unexpected => {
            let mut expected: Vec<String> = error
                .expected()
                .map(|token| match token {
                    Some(token) => format!("'{}'", token),
                    None => "end of input".to_string(),
                })
                .collect();
            expected.sort();
            expected.dedup();
            if expected.is_empty() {
                format!("unexpected {}", found)
            } else {
                format!("unexpected {}, expected {}", found, expected.join(" or "))
            }
        }
    };

    SyntaxError::new(message, error.span())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Document {
        parse_document(source).expect("source to parse")
    }

    fn passthrough_texts(block: &Block) -> Vec<&str> {
        block
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::Passthrough(p) => p.text.as_str(),
                other => panic!("expected passthrough, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_empty_source() {
        let doc = parse("");
        assert!(doc.families.is_empty());
        assert!(doc.block.is_empty());
    }

    #[test]
    fn test_keywords_split_passthrough_statements() {
        let doc = parse("INIT Init NEXT Next\nCONSTANTS N = 3, M = 4");
        assert_eq!(
            passthrough_texts(&doc.block),
            vec!["INIT Init", "NEXT Next", "CONSTANTS N = 3, M = 4"]
        );
    }

    #[test]
    fn test_passthrough_keeps_source_formatting() {
        let source = "CONSTANT\n    Procs = {p1,   p2} \\* two procs\n    N = 2\n";
        let doc = parse(source);
        assert_eq!(
            passthrough_texts(&doc.block),
            vec!["CONSTANT\n    Procs = {p1,   p2} \\* two procs\n    N = 2"]
        );
        match &doc.block.statements[0] {
            Statement::Passthrough(p) => assert_eq!(p.span, 0..source.trim_end().len()),
            other => panic!("expected passthrough, got {:?}", other),
        }
    }

    #[test]
    fn test_passthrough_keeps_inner_block_comment() {
        let doc = parse("CONSTANT N = 3 (* small\n model *) M = 4\n(* trailing *)\nINIT Init");
        assert_eq!(
            passthrough_texts(&doc.block),
            vec!["CONSTANT N = 3 (* small\n model *) M = 4", "INIT Init"]
        );
    }

    #[test]
    fn test_statement_without_keyword() {
        let doc = parse("foo = 1");
        assert_eq!(passthrough_texts(&doc.block), vec!["foo = 1"]);
    }

    #[test]
    fn test_families_declaration() {
        let doc = parse("#FAMILIES(A, B)\nINIT Init");
        assert_eq!(doc.families.len(), 1);
        let names: Vec<&str> = doc.families[0].names.iter().map(Name::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(doc.families[0].span, 0..15);
        assert_eq!(doc.block.statements.len(), 1);
    }

    #[test]
    fn test_multiple_families_declarations_are_kept() {
        let doc = parse("#FAMILIES(A)\nINIT Init\n#FAMILIES(B)");
        assert_eq!(doc.families.len(), 2);
        assert_eq!(doc.block.statements.len(), 1);
    }

    #[test]
    fn test_family_scoped_statement() {
        let doc = parse("#FAMILY(A, B) INVARIANT Inv\n#FAMILY INIT Init");
        match &doc.block.statements[0] {
            Statement::FamilyScoped(scoped) => {
                let names: Vec<&str> = scoped
                    .families
                    .as_ref()
                    .expect("explicit families")
                    .iter()
                    .map(Name::as_str)
                    .collect();
                assert_eq!(names, vec!["A", "B"]);
                assert!(matches!(*scoped.inner, Statement::Passthrough(_)));
            }
            other => panic!("expected family scoped, got {:?}", other),
        }
        match &doc.block.statements[1] {
            Statement::FamilyScoped(scoped) => assert!(scoped.families.is_none()),
            other => panic!("expected family scoped, got {:?}", other),
        }
    }

    #[test]
    fn test_one_of_with_options() {
        let doc = parse(
            "#ONEOF_SUBFOLDERS\n#OPTION X\n    INVARIANT A\n    INVARIANT B\n#OPTION Y\n#END",
        );
        match &doc.block.statements[0] {
            Statement::OneOf(one_of) => {
                assert!(one_of.with_subfolders);
                assert_eq!(one_of.options.len(), 2);
                assert_eq!(one_of.options[0].name.as_str(), "X");
                assert_eq!(
                    passthrough_texts(&one_of.options[0].body),
                    vec!["INVARIANT A", "INVARIANT B"]
                );
                assert!(one_of.options[1].body.is_empty());
            }
            other => panic!("expected one of, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_one_of() {
        let doc = parse("#ONEOF\n#OPTION X\n  #ONEOF #OPTION P INIT P #OPTION Q INIT Q #END\n  NEXT Next\n#END");
        let Statement::OneOf(outer) = &doc.block.statements[0] else {
            panic!("expected one of");
        };
        assert!(!outer.with_subfolders);
        let body = &outer.options[0].body;
        assert_eq!(body.statements.len(), 2);
        assert!(matches!(body.statements[0], Statement::OneOf(_)));
        assert!(matches!(body.statements[1], Statement::Passthrough(_)));
    }

    #[test]
    fn test_unknown_directive() {
        let errors = parse_document("INIT Init\n#INCLUDE other").expect_err("unknown directive");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unknown directive '#INCLUDE'");
        assert_eq!(errors[0].span, 10..18);
    }

    #[test]
    fn test_unterminated_one_of() {
        let errors = parse_document("#ONEOF\n#OPTION X INIT Init").expect_err("missing #END");
        assert!(!errors.is_empty());
        assert!(errors[0].message.starts_with("unexpected"));
    }

    #[test]
    fn test_one_of_requires_an_option() {
        assert!(parse_document("#ONEOF\n#END").is_err());
    }

    #[test]
    fn test_stray_end() {
        let errors = parse_document("INIT Init\n#END").expect_err("stray #END");
        assert_eq!(errors[0].span, 10..14);
    }

    #[test]
    fn test_families_inside_option_is_rejected() {
        assert!(parse_document("#ONEOF #OPTION X #FAMILIES(A) #END").is_err());
    }

    #[test]
    fn test_malformed_family_list() {
        assert!(parse_document("#FAMILIES(A)\n#FAMILY(A B) INIT Init").is_err());
    }
}
