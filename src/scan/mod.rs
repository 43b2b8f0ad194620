//! Declaration scanning over raw header text.
//!
//! # Scanning Algorithm
//!
//! 1. **Find** the earliest namespace, class or enum head from the cursor
//!    (ties resolved namespace, class, enum)
//! 2. **Extract** the brace block that follows the head
//! 3. **Dispatch**: namespaces recurse with an extended scope path, classes
//!    emit a record and recurse, enums emit a record
//! 4. **Advance** the cursor past the block
//!
//! Every branch advances the cursor, and an unterminated block ends the scan
//! of its scope, so malformed input stops scanning instead of looping.

use regex::Regex;

use crate::config::Config;
use crate::error::Result;
use crate::extract::{extract_enumerators, Extractor};
use crate::model::{Declaration, DeclarationKind, SourceSpan, SCOPE_SEPARATOR};
use crate::naming::prettify;

/// Whitespace and comments allowed between a head and its `{`
const GAP: &str = r"(?:/\*.*?\*/|\s|//[^\n]*\n)*";

/// Return the block opening at `open` and the offset just past it.
///
/// The block runs from the `{` at `open` through the brace that brings the
/// depth back to zero. Unterminated blocks (or an `open` that is not a `{`)
/// yield an empty block and `text.len()`.
pub fn extract_block(text: &str, open: usize) -> (&str, usize) {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return ("", text.len());
    }

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return (&text[open..=i], i + 1);
                }
            }
            _ => {}
        }
    }

    ("", text.len())
}

/// A matched declaration head
#[derive(Debug, Clone, Copy)]
struct Head<'t> {
    kind: DeclarationKind,
    name: &'t str,
    start: usize,
    end: usize,
}

/// Enclosing scope path of a class head
#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    namespace: &'a str,
    depth: usize,
}

/// Recursive scanner for annotated declarations
#[derive(Debug, Clone)]
pub struct Scanner {
    namespace_pattern: Regex,
    class_pattern: Regex,
    enum_pattern: Regex,
    extractor: Extractor,
}

impl Scanner {
    pub fn new(config: &Config) -> Result<Self> {
        let class_marker = regex::escape(&config.markers.class);
        let enum_marker = regex::escape(&config.markers.enumeration);

        Ok(Self {
            namespace_pattern: Regex::new(&format!(
                r"(?s)\bnamespace\s+(\w+(?:::\w+)*)\s*{GAP}\{{"
            ))?,
            class_pattern: Regex::new(&format!(
                r"(?s)\b{class_marker}\(\s*\)\s*(?:class|struct)\s+(\w+)(?:\s+final)?(?:\s*:[^{{;]*)?{GAP}\{{"
            ))?,
            enum_pattern: Regex::new(&format!(
                r"(?s)\b{enum_marker}\(\s*\)\s*enum\s+(?:(?:class|struct)\s+)?(\w+)(?:\s*:\s*[\w:\s]+?)?{GAP}\{{"
            ))?,
            extractor: Extractor::new(config)?,
        })
    }

    /// Scan a whole translation unit into a flat, scan-ordered record list
    pub fn scan(&self, text: &str) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        self.scan_scope(text, 0, "", 0, &mut declarations);
        tracing::debug!("Scanned {} declaration(s)", declarations.len());
        declarations
    }

    /// Scan one scope. `base` is the absolute offset of `text` in the input;
    /// `depth` counts the leading segments of `namespace` that are namespaces.
    fn scan_scope(
        &self,
        text: &str,
        base: usize,
        namespace: &str,
        depth: usize,
        out: &mut Vec<Declaration>,
    ) {
        let mut cursor = 0;

        while cursor < text.len() {
            let Some(head) = self.next_head(text, cursor) else {
                break;
            };

            // Head patterns end on the opening brace, so brace-less heads
            // (forward declarations) never match.
            let open = head.end - 1;
            let (block, end) = extract_block(text, open);
            if block.is_empty() {
                tracing::warn!(
                    "Unterminated block for {} {}{} at byte {}",
                    head.kind,
                    namespace,
                    head.name,
                    base + head.start
                );
                break;
            }

            let interior = &block[1..block.len() - 1];
            let interior_base = base + open + 1;
            let span = SourceSpan {
                start: base + head.start,
                end: base + end,
            };

            match head.kind {
                DeclarationKind::Namespace => {
                    let scope = format!("{}{}{}", namespace, head.name, SCOPE_SEPARATOR);
                    let depth = depth + head.name.split(SCOPE_SEPARATOR).count();
                    self.scan_scope(interior, interior_base, &scope, depth, out);
                }
                DeclarationKind::Class => {
                    let scope = Scope { namespace, depth };
                    self.scan_class(head.name, scope, span, interior, interior_base, out);
                }
                DeclarationKind::Enum => {
                    tracing::debug!("Enum {}{}", namespace, head.name);
                    out.push(Declaration {
                        kind: DeclarationKind::Enum,
                        name: head.name.to_string(),
                        namespace: namespace.to_string(),
                        namespace_depth: depth,
                        display_name: prettify(head.name),
                        span,
                        properties: vec![],
                        refresh: None,
                        enumerators: extract_enumerators(block),
                    });
                }
            }

            cursor = end;
        }
    }

    /// Record a class, then scan its body for nested annotated declarations.
    ///
    /// Members of nested annotated classes belong to those classes, so their
    /// spans are cut out of the body before property extraction.
    fn scan_class(
        &self,
        name: &str,
        enclosing: Scope<'_>,
        span: SourceSpan,
        interior: &str,
        interior_base: usize,
        out: &mut Vec<Declaration>,
    ) {
        tracing::debug!("Class {}{}", enclosing.namespace, name);

        let index = out.len();
        out.push(Declaration {
            kind: DeclarationKind::Class,
            name: name.to_string(),
            namespace: enclosing.namespace.to_string(),
            namespace_depth: enclosing.depth,
            display_name: prettify(name),
            span,
            properties: vec![],
            refresh: None,
            enumerators: vec![],
        });

        let scope = out[index].own_scope();
        self.scan_scope(interior, interior_base, &scope, enclosing.depth, out);

        let nested: Vec<SourceSpan> = out[index + 1..]
            .iter()
            .filter(|decl| decl.is_class() && decl.namespace == scope)
            .map(|decl| decl.span)
            .collect();
        let body = without_spans(interior, interior_base, &nested);

        let class = &mut out[index];
        class.properties = self.extractor.extract_properties(&body);
        class.refresh = self.extractor.extract_refresh(&body);
    }

    /// Earliest head at or after `cursor`; first pattern wins ties
    fn next_head<'t>(&self, text: &'t str, cursor: usize) -> Option<Head<'t>> {
        [
            (DeclarationKind::Namespace, &self.namespace_pattern),
            (DeclarationKind::Class, &self.class_pattern),
            (DeclarationKind::Enum, &self.enum_pattern),
        ]
        .into_iter()
        .filter_map(|(kind, pattern)| {
            let cap = pattern.captures_at(text, cursor)?;
            let whole = cap.get(0)?;
            Some(Head {
                kind,
                name: cap.get(1)?.as_str(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .min_by_key(|head| head.start)
    }
}

/// Copy of `text` without the given absolute spans
fn without_spans(text: &str, base: usize, spans: &[SourceSpan]) -> String {
    let mut body = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        let start = span.start - base;
        let end = span.end - base;
        body.push_str(&text[last..start]);
        body.push('\n');
        last = end;
    }
    body.push_str(&text[last..]);
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Vec<Declaration> {
        Scanner::new(&Config::default()).unwrap().scan(text)
    }

    #[test]
    fn test_extract_block_nested() {
        let text = "x { a { b } c } tail";
        let (block, end) = extract_block(text, 2);
        assert_eq!(block, "{ a { b } c }");
        assert_eq!(&text[end..], " tail");
    }

    #[test]
    fn test_extract_block_unterminated() {
        let text = "{ a { b }";
        assert_eq!(extract_block(text, 0), ("", text.len()));
    }

    #[test]
    fn test_extract_block_requires_open_brace() {
        assert_eq!(extract_block("abc", 1), ("", 3));
    }

    #[test]
    fn test_nested_namespaces() {
        let text = r#"
namespace B {
namespace A {
WCLASS()
class Thing {
    WPROPERTY()
    float size;
};
}
}
"#;
        let decls = scan(text);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].namespace, "B::A::");
        assert_eq!(decls[0].qualified_name(), "B::A::Thing");
    }

    #[test]
    fn test_compound_namespace_head() {
        let decls = scan("namespace a::b { WCLASS() class C {}; }");
        assert_eq!(decls[0].namespace, "a::b::");
    }

    #[test]
    fn test_comments_between_head_and_brace() {
        let text = "namespace wsp // engine\n/* core */ {\nWCLASS()\nclass Node : public Base /* x */\n{\n};\n}";
        let decls = scan(text);
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Node");
        assert_eq!(decls[0].namespace, "wsp::");
    }

    #[test]
    fn test_unannotated_class_ignored() {
        let decls = scan("namespace wsp { class Plain { WPROPERTY()\nfloat x;\n }; }");
        assert!(decls.is_empty());
    }

    #[test]
    fn test_using_namespace_is_not_a_head() {
        let decls = scan("using namespace std;\nWCLASS() class A { };");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].namespace, "");
    }

    #[test]
    fn test_nested_enum_inside_class() {
        let text = r#"
namespace wsp {
WCLASS()
class ButtonAction : public InputAction
{
  public:
    WENUM()
    enum Usage
    {
        ePressed,  // sends when first pressed
        eHeld,
    };

  private:
    WPROPERTY()
    Usage _buttonUsage;
};
}
"#;
        let decls = scan(text);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].kind, DeclarationKind::Class);
        assert_eq!(decls[0].display_name, "Button Action");
        assert_eq!(decls[0].properties.len(), 1);
        assert_eq!(decls[1].kind, DeclarationKind::Enum);
        assert_eq!(decls[1].namespace, "wsp::ButtonAction::");
        assert_eq!(decls[1].enumerators.len(), 2);
    }

    #[test]
    fn test_nested_class_members_stay_with_nested_class() {
        let text = r#"
WCLASS()
class Outer {
    WPROPERTY()
    float outer;

    WCLASS()
    struct Inner {
        WPROPERTY()
        int inner;
        WREFRESH()
        void Rebuild();
    };

    WPROPERTY()
    Inner child;
};
"#;
        let decls = scan(text);
        assert_eq!(decls.len(), 2);
        let outer: Vec<_> = decls[0].properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(outer, vec!["outer", "child"]);
        assert_eq!(decls[0].refresh, None);
        assert_eq!(decls[1].namespace, "Outer::");
        assert_eq!(decls[1].properties[0].name, "inner");
        assert_eq!(decls[1].refresh.as_deref(), Some("Rebuild"));
    }

    #[test]
    fn test_forward_declaration_is_skipped() {
        let text = "WCLASS() class Fwd;\nWCLASS()\nclass Real {\n    WPROPERTY()\n    int count;\n};";
        let decls = scan(text);
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Real"]);
        assert_eq!(decls[0].properties[0].name, "count");
    }

    #[test]
    fn test_namespace_depth_stops_at_classes() {
        let text = "namespace a::b { WCLASS() class Outer { WENUM() enum Mode { eOn }; }; }\nWCLASS() class Top { WCLASS() struct Leaf { }; };";
        let depths: Vec<_> = scan(text)
            .into_iter()
            .map(|d| (d.qualified_name(), d.namespace_depth))
            .collect();
        assert_eq!(
            depths,
            vec![
                ("a::b::Outer".to_string(), 2),
                ("a::b::Outer::Mode".to_string(), 2),
                ("Top".to_string(), 0),
                ("Top::Leaf".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_enum_class_with_underlying_type() {
        let decls = scan("WENUM()\nenum class Mode : uint8_t { eFast, eSlow };");
        assert_eq!(decls[0].name, "Mode");
        assert_eq!(decls[0].enumerators[1].display_name, "Slow");
    }

    #[test]
    fn test_unterminated_scope_stops_scan() {
        let decls = scan("WCLASS() class Ok { };\nWCLASS() class Broken { WPROPERTY()\nfloat x;\n");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "Ok");
    }

    #[test]
    fn test_scan_order_is_depth_first() {
        let text = "WCLASS() class A { WENUM() enum E { eX }; };\nWCLASS() class B { };";
        let names: Vec<_> = scan(text).into_iter().map(|d| d.qualified_name()).collect();
        assert_eq!(names, vec!["A", "A::E", "B"]);
    }

    #[test]
    fn test_spans_are_absolute() {
        let text = "namespace n { WCLASS() class A { }; }";
        let decls = scan(text);
        let span = decls[0].span;
        assert_eq!(&text[span.start..span.end], "WCLASS() class A { }");
    }
}
