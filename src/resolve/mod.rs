//! Type reference resolution.
//!
//! Runs after the whole input is scanned. Pass one builds a read-only
//! [`TypeIndex`] of every class and enum; pass two rewrites property types of
//! each class so names of types nested directly in that class become fully
//! qualified (`Usage` inside `wsp::ButtonAction` -> `wsp::ButtonAction::Usage`).
//!
//! Sibling or cousin nested types are left alone; only an exact scope match
//! qualifies.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Declaration, SCOPE_SEPARATOR};

/// Word runs and the separator runs between them
static TYPE_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+|\W+").unwrap());

/// A declared type as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexedType {
    name: String,
    namespace: String,
    qualified: String,
}

/// Read-only lookup of every declared class and enum
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    types: Vec<IndexedType>,
}

impl TypeIndex {
    pub fn build(declarations: &[Declaration]) -> Self {
        let types = declarations
            .iter()
            .filter(|decl| decl.is_class() || decl.is_enum())
            .map(|decl| IndexedType {
                name: decl.name.clone(),
                namespace: decl.namespace.clone(),
                qualified: decl.qualified_name(),
            })
            .collect();
        Self { types }
    }

    /// Qualified name of the type called `name` declared directly in `scope`
    pub fn lookup(&self, scope: &str, name: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|ty| ty.name == name && ty.namespace == scope)
            .map(|ty| ty.qualified.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Qualify type references in every class's properties
pub fn resolve_type_references(declarations: &mut [Declaration]) {
    let index = TypeIndex::build(declarations);

    for decl in declarations.iter_mut().filter(|decl| decl.is_class()) {
        let scope = decl.own_scope();
        for property in &mut decl.properties {
            let qualified = qualify_type(&property.ty, &scope, &index);
            if qualified != property.ty {
                tracing::debug!("Qualified {} -> {}", property.ty, qualified);
                property.ty = qualified;
            }
        }
    }
}

/// Rewrite word tokens of `ty` that name a type nested in `scope`.
///
/// Tokens already preceded by `::` are part of a qualified path and are kept,
/// which makes the rewrite idempotent.
pub fn qualify_type(ty: &str, scope: &str, index: &TypeIndex) -> String {
    let mut out = String::with_capacity(ty.len());

    for token in TYPE_TOKEN_PATTERN.find_iter(ty).map(|m| m.as_str()) {
        let is_word = token.starts_with(|c: char| c.is_alphanumeric() || c == '_');
        let replacement = if is_word && !out.ends_with(SCOPE_SEPARATOR) {
            index.lookup(scope, token)
        } else {
            None
        };
        out.push_str(replacement.unwrap_or(token));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclarationKind, Property, SourceSpan};
    use pretty_assertions::assert_eq;

    fn decl(kind: DeclarationKind, name: &str, namespace: &str) -> Declaration {
        Declaration {
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
            namespace_depth: 0,
            display_name: name.to_string(),
            span: SourceSpan::default(),
            properties: vec![],
            refresh: None,
            enumerators: vec![],
        }
    }

    fn property(ty: &str) -> Property {
        Property {
            ty: ty.to_string(),
            name: "_value".to_string(),
            display_name: "Value".to_string(),
            edit: "Edit::eInput".to_string(),
            args: vec![],
        }
    }

    fn fixture() -> Vec<Declaration> {
        let mut action = decl(DeclarationKind::Class, "ButtonAction", "wsp::");
        action.properties = vec![
            property("Usage"),
            property("std::vector<Usage>"),
            property("Button"),
        ];
        vec![
            action,
            decl(DeclarationKind::Enum, "Usage", "wsp::ButtonAction::"),
            decl(DeclarationKind::Enum, "Usage", "wsp::AxisAction::"),
        ]
    }

    #[test]
    fn test_same_class_nested_type_is_qualified() {
        let mut decls = fixture();
        resolve_type_references(&mut decls);
        let types: Vec<_> = decls[0].properties.iter().map(|p| p.ty.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "wsp::ButtonAction::Usage",
                "std::vector<wsp::ButtonAction::Usage>",
                "Button",
            ]
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut once = fixture();
        resolve_type_references(&mut once);
        let mut twice = once.clone();
        resolve_type_references(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sibling_nested_type_not_qualified() {
        let mut other = decl(DeclarationKind::Class, "AxisBinding", "wsp::");
        other.properties = vec![property("Usage")];
        let mut decls = fixture();
        decls.push(other);
        resolve_type_references(&mut decls);
        assert_eq!(decls[3].properties[0].ty, "Usage");
    }

    #[test]
    fn test_qualified_path_tokens_are_kept() {
        let index = TypeIndex::build(&fixture());
        assert_eq!(
            qualify_type("Other::Usage", "wsp::ButtonAction::", &index),
            "Other::Usage"
        );
        assert_eq!(
            qualify_type("const Usage *", "wsp::ButtonAction::", &index),
            "const wsp::ButtonAction::Usage *"
        );
    }

    #[test]
    fn test_index_ignores_namespaces() {
        let decls = vec![decl(DeclarationKind::Namespace, "wsp", "")];
        assert!(TypeIndex::build(&decls).is_empty());
        assert_eq!(TypeIndex::build(&fixture()).len(), 3);
    }
}
