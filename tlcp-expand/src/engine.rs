//! Expansion engine
//!
//!     Expansion is a fold over the document tree into lists of [ConfigVariant]s:
//!
//!         Block         cross product of its statements' lists, starting from [identity]
//!         FamilyScoped  the inner statement's list, or [identity] when the family being
//!                       expanded is not in scope
//!         OneOf         concatenation of its options' lists
//!         Option        the body's list, each variant's name prefixed with the option
//!                       name (and its path too under `#ONEOF_SUBFOLDERS`)
//!         Passthrough   one variant holding the statement text plus a newline
//!
//!     The only context threaded through the recursion is the family being expanded
//!     and the subfolder flag of the enclosing choice; both are passed by value and
//!     never changed by siblings.
//!
//!     Validation is done inline. Any error aborts the expansion of the whole document
//!     so callers never see a partial variant list.

use crate::error::ExpandError;
use crate::families::Families;
use crate::variant::{cross, ConfigVariant, NAME_SEPARATOR};
use tlcp_parser::tlcp::{Block, Document, FamilyScoped, OneOf, OptionItem, Passthrough, Statement};
use tracing::debug;

/// Family currently being expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope<'a> {
    /// The document declares no families
    Unscoped,
    Family(&'a str),
}

/// Expand a document into its configuration variants
///
/// Without families the block is expanded once and every name is prefixed with
/// `base_name`. With families the block is expanded once per family, in declaration
/// order; names are prefixed with `<base_name>_<family>` and paths with the family.
pub fn expand(document: &Document, base_name: &str) -> Result<Vec<ConfigVariant>, ExpandError> {
    let families = Families::resolve(document)?;
    let expander = Expander {
        families: &families,
    };

    if !families.is_declared() {
        let variants = expander
            .block(&document.block, Scope::Unscoped)?
            .into_iter()
            .map(|variant| variant.with_name_prefix(base_name))
            .collect::<Vec<_>>();
        debug!(base_name, variants = variants.len(), "expanded document");
        return Ok(variants);
    }

    let mut variants = Vec::new();
    for family in families.iter() {
        let prefix = format!("{}{}{}", base_name, NAME_SEPARATOR, family);
        let expanded = expander.block(&document.block, Scope::Family(family))?;
        debug!(base_name, family, variants = expanded.len(), "expanded family");
        variants.extend(
            expanded
                .into_iter()
                .map(|variant| variant.with_name_prefix(&prefix).with_path_prefix(family)),
        );
    }
    Ok(variants)
}

struct Expander<'a> {
    families: &'a Families,
}

impl Expander<'_> {
    fn block(&self, block: &Block, scope: Scope<'_>) -> Result<Vec<ConfigVariant>, ExpandError> {
        let mut variants = vec![ConfigVariant::identity()];
        for statement in &block.statements {
            let expanded = self.statement(statement, scope)?;
            variants = cross(&variants, &expanded);
        }
        Ok(variants)
    }

    fn statement(
        &self,
        statement: &Statement,
        scope: Scope<'_>,
    ) -> Result<Vec<ConfigVariant>, ExpandError> {
        match statement {
            Statement::FamilyScoped(scoped) => self.family_scoped(scoped, scope),
            Statement::OneOf(one_of) => self.one_of(one_of, scope),
            Statement::Passthrough(passthrough) => Ok(vec![Self::passthrough(passthrough)]),
        }
    }

    fn family_scoped(
        &self,
        scoped: &FamilyScoped,
        scope: Scope<'_>,
    ) -> Result<Vec<ConfigVariant>, ExpandError> {
        // References are checked even when the statement is skipped below.
        if let Some(references) = &scoped.families {
            self.families.check_references(references)?;
        }

        let in_scope = match (scope, &scoped.families) {
            (Scope::Unscoped, _) | (Scope::Family(_), None) => true,
            (Scope::Family(family), Some(references)) => {
                references.iter().any(|name| name.text == family)
            }
        };

        if in_scope {
            self.statement(&scoped.inner, scope)
        } else {
            Ok(vec![ConfigVariant::identity()])
        }
    }

    fn one_of(&self, one_of: &OneOf, scope: Scope<'_>) -> Result<Vec<ConfigVariant>, ExpandError> {
        let mut variants = Vec::new();
        for option in &one_of.options {
            variants.extend(self.option(option, one_of.with_subfolders, scope)?);
        }
        Ok(variants)
    }

    fn option(
        &self,
        option: &OptionItem,
        with_subfolders: bool,
        scope: Scope<'_>,
    ) -> Result<Vec<ConfigVariant>, ExpandError> {
        let name = option.name.as_str();
        if name.contains(NAME_SEPARATOR) {
            return Err(ExpandError::IllegalOptionName {
                name: name.to_string(),
                span: option.name.span.clone(),
            });
        }

        let variants = self
            .block(&option.body, scope)?
            .into_iter()
            .map(|variant| {
                let variant = variant.with_name_prefix(name);
                if with_subfolders {
                    variant.with_path_prefix(name)
                } else {
                    variant
                }
            })
            .collect();
        Ok(variants)
    }

    fn passthrough(passthrough: &Passthrough) -> ConfigVariant {
        let mut text = String::with_capacity(passthrough.text.len() + 1);
        text.push_str(&passthrough.text);
        text.push('\n');
        ConfigVariant::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlcp_parser::tlcp::parse_document;

    fn expand_source(source: &str, base_name: &str) -> Result<Vec<ConfigVariant>, ExpandError> {
        expand(&parse_document(source).expect("source to parse"), base_name)
    }

    fn names(variants: &[ConfigVariant]) -> Vec<&str> {
        variants.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_plain_document_yields_one_variant() {
        let variants = expand_source("INIT Init\nNEXT Next", "spec").expect("expansion");
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].name, "spec");
        assert!(variants[0].path.is_empty());
        assert_eq!(variants[0].text.render(), "INIT Init\nNEXT Next\n");
    }

    #[test]
    fn test_empty_document_yields_base_name_only() {
        let variants = expand_source("", "spec").expect("expansion");
        assert_eq!(variants, vec![ConfigVariant::new("spec", vec![], "")]);
    }

    #[test]
    fn test_sibling_choices_multiply() {
        let variants = expand_source(
            "#ONEOF #OPTION A INIT A #OPTION B INIT B #END\n\
             #ONEOF #OPTION X NEXT X #OPTION Y NEXT Y #OPTION Z NEXT Z #END",
            "m",
        )
        .expect("expansion");
        assert_eq!(
            names(&variants),
            vec!["m_AX", "m_AY", "m_AZ", "m_BX", "m_BY", "m_BZ"]
        );
        assert_eq!(variants[5].text.render(), "INIT B\nNEXT Z\n");
    }

    #[test]
    fn test_options_sum() {
        let variants = expand_source(
            "#ONEOF\n#OPTION A\n  #ONEOF #OPTION P INIT P #OPTION Q INIT Q #END\n#OPTION B INIT B\n#END",
            "m",
        )
        .expect("expansion");
        assert_eq!(names(&variants), vec!["m_A_P", "m_A_Q", "m_B"]);
    }

    #[test]
    fn test_subfolders_prefix_paths() {
        let variants = expand_source(
            "#ONEOF_SUBFOLDERS #OPTION X\n  #ONEOF_SUBFOLDERS #OPTION P INIT P #END\n#END",
            "m",
        )
        .expect("expansion");
        assert_eq!(variants[0].name, "m_X_P");
        assert_eq!(variants[0].path, vec!["X".to_string(), "P".to_string()]);
    }

    #[test]
    fn test_families_prefix_names_and_paths() {
        let variants =
            expand_source("#FAMILIES(A, B)\n#ONEOF #OPTION X INIT X #END", "m").expect("expansion");
        assert_eq!(names(&variants), vec!["m_A_X", "m_B_X"]);
        assert_eq!(variants[0].path, vec!["A".to_string()]);
        assert_eq!(variants[1].path, vec!["B".to_string()]);
    }

    #[test]
    fn test_scoped_statement_only_reaches_its_family() {
        let variants = expand_source(
            "#FAMILIES(A, B)\nINIT Init\n#FAMILY(A) INVARIANT OnlyA\n#FAMILY INVARIANT Both",
            "m",
        )
        .expect("expansion");
        assert_eq!(variants.len(), 2);
        assert_eq!(
            variants[0].text.render(),
            "INIT Init\nINVARIANT OnlyA\nINVARIANT Both\n"
        );
        assert_eq!(variants[1].text.render(), "INIT Init\nINVARIANT Both\n");
    }

    #[test]
    fn test_scoped_choice_does_not_branch_other_families() {
        let variants = expand_source(
            "#FAMILIES(A, B)\n#FAMILY(A) #ONEOF #OPTION X INIT X #OPTION Y INIT Y #END",
            "m",
        )
        .expect("expansion");
        assert_eq!(names(&variants), vec!["m_A_X", "m_A_Y", "m_B"]);
    }

    #[test]
    fn test_unknown_family_on_inactive_branch_is_reported() {
        let err = expand_source("#FAMILIES(A)\n#FAMILY(A, C) INIT Init", "m")
            .expect_err("unknown family");
        assert!(matches!(err, ExpandError::UnknownFamily { ref name, .. } if name == "C"));
    }

    #[test]
    fn test_family_reference_without_declaration() {
        let err = expand_source("#FAMILY(A) INIT Init", "m").expect_err("unknown family");
        assert!(matches!(err, ExpandError::UnknownFamily { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_unscoped_family_statement_without_declaration() {
        let variants = expand_source("#FAMILY INIT Init", "m").expect("expansion");
        assert_eq!(variants[0].text.render(), "INIT Init\n");
    }

    #[test]
    fn test_illegal_option_name() {
        let source = "#ONEOF #OPTION Bad_Name INIT Init #END";
        let err = expand_source(source, "m").expect_err("illegal option name");
        assert_eq!(
            err,
            ExpandError::IllegalOptionName {
                name: "Bad_Name".to_string(),
                span: 15..23
            }
        );
    }
}
