//! Family declarations
//!
//! Families are resolved once, before expansion, into an immutable [Families] value
//! that the engine only reads.

use crate::error::ExpandError;
use crate::variant::NAME_SEPARATOR;
use tlcp_parser::tlcp::{Document, Name};

/// The validated, ordered list of declared families
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Families {
    names: Vec<String>,
}

impl Families {
    /// Validate the document's `#FAMILIES` declaration
    ///
    /// At most one declaration is allowed; names must be distinct and must not contain
    /// the name separator.
    pub fn resolve(document: &Document) -> Result<Self, ExpandError> {
        let decl = match document.families.as_slice() {
            [] => return Ok(Families::default()),
            [decl] => decl,
            [_, second, ..] => {
                return Err(ExpandError::MultipleFamiliesDeclarations {
                    span: second.span.clone(),
                })
            }
        };

        let mut names: Vec<String> = Vec::with_capacity(decl.names.len());
        for name in &decl.names {
            if name.text.contains(NAME_SEPARATOR) {
                return Err(ExpandError::IllegalFamilyName {
                    name: name.text.clone(),
                    span: name.span.clone(),
                });
            }
            if names.contains(&name.text) {
                return Err(ExpandError::DuplicateFamily {
                    name: name.text.clone(),
                    span: name.span.clone(),
                });
            }
            names.push(name.text.clone());
        }

        Ok(Families { names })
    }

    /// Whether the document declares any family at all
    pub fn is_declared(&self) -> bool {
        !self.names.is_empty()
    }

    pub fn contains(&self, family: &str) -> bool {
        self.names.iter().any(|name| name == family)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Check that every family a statement names is declared
    pub fn check_references(&self, references: &[Name]) -> Result<(), ExpandError> {
        match references.iter().find(|name| !self.contains(&name.text)) {
            Some(unknown) => Err(ExpandError::UnknownFamily {
                name: unknown.text.clone(),
                span: unknown.span.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlcp_parser::tlcp::parse_document;

    fn resolve(source: &str) -> Result<Families, ExpandError> {
        Families::resolve(&parse_document(source).expect("source to parse"))
    }

    #[test]
    fn test_no_declaration() {
        let families = resolve("INIT Init").expect("families to resolve");
        assert!(!families.is_declared());
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let families = resolve("#FAMILIES(Zeta, Alpha)").expect("families to resolve");
        assert_eq!(families.iter().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
        assert!(families.contains("Alpha"));
        assert!(!families.contains("Beta"));
    }

    #[test]
    fn test_second_declaration_is_rejected() {
        let err = resolve("#FAMILIES(A)\n#FAMILIES(B)").expect_err("two declarations");
        assert_eq!(err, ExpandError::MultipleFamiliesDeclarations { span: 13..25 });
    }

    #[test]
    fn test_underscore_is_rejected() {
        let err = resolve("#FAMILIES(Ok, Not_Ok)").expect_err("illegal name");
        assert_eq!(
            err,
            ExpandError::IllegalFamilyName {
                name: "Not_Ok".to_string(),
                span: 14..20
            }
        );
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let err = resolve("#FAMILIES(A, B, A)").expect_err("duplicate name");
        assert!(matches!(err, ExpandError::DuplicateFamily { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_check_references() {
        let families = resolve("#FAMILIES(A, B)").expect("families to resolve");
        assert!(families.check_references(&[Name::new("B", 0..1)]).is_ok());
        let err = families
            .check_references(&[Name::new("A", 0..1), Name::new("C", 3..4)])
            .expect_err("unknown family");
        assert_eq!(
            err,
            ExpandError::UnknownFamily {
                name: "C".to_string(),
                span: 3..4
            }
        );
    }
}
