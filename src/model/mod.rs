//! Declaration records discovered by the scanner.
//!
//! Records are built once per run, kept in scan order, resolved in place and
//! then consumed by the emitter. Ordering of `properties` and `enumerators` is
//! part of the output contract.

use serde::Serialize;

/// Scope separator used in namespace paths and qualified names
pub const SCOPE_SEPARATOR: &str = "::";

/// Kind of annotated construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// Only used while scanning; never stored in the output list
    Namespace,
    Class,
    Enum,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Namespace => "namespace",
            DeclarationKind::Class => "class",
            DeclarationKind::Enum => "enum",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Absolute byte range of a head plus its block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

/// One annotated class or enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Enclosing scopes, each followed by `::`; empty at top level
    pub namespace: String,
    /// How many leading segments of `namespace` are real namespaces; the
    /// rest are enclosing classes
    #[serde(skip)]
    pub namespace_depth: usize,
    pub display_name: String,
    pub span: SourceSpan,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enumerators: Vec<Enumerator>,
}

impl Declaration {
    /// `namespace` followed by `name`, e.g. `wsp::ButtonAction`
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.namespace, self.name)
    }

    /// Scope path of members declared inside this record
    pub fn own_scope(&self) -> String {
        format!("{}{}{}", self.namespace, self.name, SCOPE_SEPARATOR)
    }

    pub fn is_class(&self) -> bool {
        self.kind == DeclarationKind::Class
    }

    pub fn is_enum(&self) -> bool {
        self.kind == DeclarationKind::Enum
    }

    /// Outermost enclosing namespace, if any (`wsp` for `wsp::Inner::`).
    ///
    /// `None` when the outermost scope is a class, since that cannot be named
    /// in a `using namespace` directive.
    pub fn root_namespace(&self) -> Option<&str> {
        if self.namespace_depth == 0 {
            return None;
        }
        self.namespace
            .split(SCOPE_SEPARATOR)
            .next()
            .filter(|root| !root.is_empty())
    }
}

/// One annotated class member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub display_name: String,
    pub edit: String,
    pub args: Vec<String>,
}

/// One enum value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumerator {
    pub name: String,
    pub display_name: String,
}
