//! Member extraction from class and enum bodies.
//!
//! Property and refresh annotations describe the declaration on the *next*
//! line. That positional guess lives behind [`infer_declaration_from_next_line`]
//! so the extractors never look at raw neighbor lines themselves.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{ArgumentSplit, Config, PropertyDefaults};
use crate::error::Result;
use crate::model::{Enumerator, Property};
use crate::naming::prettify_member;

mod arguments;

pub use arguments::split_arguments;

/// `name[16]` style array suffix on a member name
static ARRAY_SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(\[\d+\])$").unwrap());

/// `/* ... */` comments, across lines
static BLOCK_COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// `// ...` comments up to end of line
static LINE_COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());

/// Member declaration inferred from a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDeclaration {
    /// Type text, tokens joined by single spaces
    pub ty: String,
    pub name: String,
}

/// Infer the member declared on the line after `index`.
///
/// Returns `None` when there is no next line or it holds fewer than two tokens
/// once comments, initializers and trailing punctuation are removed.
pub fn infer_declaration_from_next_line(lines: &[&str], index: usize) -> Option<MemberDeclaration> {
    let line = lines.get(index + 1)?;
    let code = strip_line_comment(line);
    let code = match code.find([';', '{', '=']) {
        Some(cut) => &code[..cut],
        None => code,
    };

    let mut tokens: Vec<&str> = code.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let name = tokens.pop()?;
    let mut ty = tokens.join(" ");

    let name = match ARRAY_SUFFIX_PATTERN.captures(name) {
        Some(cap) => {
            ty.push_str(&cap[2]);
            cap[1].to_string()
        }
        None => name.to_string(),
    };

    Some(MemberDeclaration { ty, name })
}

/// Cut `line` at the first `//` outside a string or character literal
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote = None;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if b == b'\\' => escaped = true,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => return &line[..i],
                _ => {}
            },
        }
    }

    line
}

/// Extracts properties and refresh hooks from class bodies
#[derive(Debug, Clone)]
pub struct Extractor {
    property_pattern: Regex,
    refresh_marker: String,
    defaults: PropertyDefaults,
    split: ArgumentSplit,
}

impl Extractor {
    pub fn new(config: &Config) -> Result<Self> {
        let property_pattern = Regex::new(&format!(
            r"\b{}\((.*)\)",
            regex::escape(&config.markers.property)
        ))?;

        Ok(Self {
            property_pattern,
            refresh_marker: config.markers.refresh_literal(),
            defaults: config.defaults.clone(),
            split: config.arguments,
        })
    }

    /// Collect annotated properties of a class body in source order
    pub fn extract_properties(&self, body: &str) -> Vec<Property> {
        let lines: Vec<&str> = body.lines().collect();
        let mut properties = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let Some(cap) = self.property_pattern.captures(strip_line_comment(line)) else {
                continue;
            };

            let Some(decl) = infer_declaration_from_next_line(&lines, i) else {
                tracing::trace!("Annotation without declaration: {}", line.trim());
                continue;
            };

            let mut property = Property {
                display_name: prettify_member(&decl.name),
                edit: self.defaults.edit.clone(),
                args: self.defaults.args_for(&decl.ty),
                ty: decl.ty,
                name: decl.name,
            };
            self.apply_overrides(&mut property, &cap[1]);

            tracing::debug!(
                "Property {} {} ({})",
                property.ty,
                property.name,
                property.edit
            );
            properties.push(property);
        }

        properties
    }

    /// First edit-kind, then argument slots; extra arguments are dropped
    fn apply_overrides(&self, property: &mut Property, arguments: &str) {
        let args = split_arguments(arguments, self.split);
        let Some((edit, rest)) = args.split_first() else {
            return;
        };
        if edit.is_empty() {
            return;
        }
        property.edit = edit.clone();

        let slots = property.args.len();
        if rest.len() > slots {
            tracing::debug!(
                "Ignoring {} extra argument(s) on {}",
                rest.len() - slots,
                property.name
            );
        }
        for (slot, value) in property.args.iter_mut().zip(rest) {
            *slot = value.clone();
        }
    }

    /// Method named on the line after the first refresh marker
    pub fn extract_refresh(&self, body: &str) -> Option<String> {
        let lines: Vec<&str> = body.lines().collect();
        let index = lines
            .iter()
            .position(|line| line.contains(&self.refresh_marker))?;

        let next = lines.get(index + 1)?;
        let tokens: Vec<&str> = next.split_whitespace().collect();
        if tokens.len() < 2 {
            return None;
        }

        let name = tokens[1].trim_end_matches(['(', ')', ';']);
        Some(name.to_string())
    }
}

/// Split an enum block into enumerators, keeping declaration order.
///
/// Accepts the block with or without its outer braces. Explicit values
/// (`eA = 4`) keep only the identifier.
pub fn extract_enumerators(block: &str) -> Vec<Enumerator> {
    let inner = block.trim();
    let inner = inner.strip_prefix('{').unwrap_or(inner);
    let inner = inner.strip_suffix('}').unwrap_or(inner);

    let without_block = BLOCK_COMMENT_PATTERN.replace_all(inner, " ");
    let code = LINE_COMMENT_PATTERN.replace_all(&without_block, "");

    code.split(',')
        .filter_map(|entry| {
            let name = entry.split('=').next()?.trim();
            if name.is_empty() {
                return None;
            }
            Some(Enumerator {
                name: name.to_string(),
                display_name: prettify_member(name),
            })
        })
        .collect()
}
