//! Generated header rendering.
//!
//! Renders resolved declarations into the `frost` reflection header:
//! an include guard, friend macros per class and one `#define` whose body holds
//! every `frost::Meta<T>` specialization and enum dictionary. Everything is
//! traversed in scan order, so identical input renders identical bytes.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::config::OutputConfig;
use crate::error::Result;
use crate::model::{Declaration, Property, SCOPE_SEPARATOR};

mod templates;

use templates::{CLASS, CLASS_TEMPLATE, ENUM, ENUM_TEMPLATE, HEADER, HEADER_TEMPLATE};

#[derive(Debug, Serialize)]
struct HeaderView<'a> {
    guard: String,
    includes: &'a [String],
    friends: Vec<FriendView>,
    body_macro: &'a str,
    data_macro: &'a str,
    meta: &'a str,
    body: String,
}

#[derive(Debug, Serialize)]
struct FriendView {
    name: String,
    qualified: String,
}

#[derive(Debug, Serialize)]
struct ClassView<'a> {
    meta: &'a str,
    usage_enum: &'a str,
    qualified: String,
    display_name: &'a str,
    fields: Vec<FieldView>,
    refresh: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct FieldView {
    ty: String,
    initializer: String,
}

#[derive(Debug, Serialize)]
struct EnumView<'a> {
    meta: &'a str,
    usage_enum: &'a str,
    dictionary: &'a str,
    qualified: String,
    display_name: &'a str,
    entries: Vec<EntryView>,
}

#[derive(Debug, Serialize)]
struct EntryView {
    label: String,
    value: String,
}

/// Renders declarations with the registered templates
pub struct Emitter {
    registry: Handlebars<'static>,
    output: OutputConfig,
}

impl Emitter {
    pub fn new(output: &OutputConfig) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        for (name, source) in [
            (HEADER_TEMPLATE, HEADER),
            (CLASS_TEMPLATE, CLASS),
            (ENUM_TEMPLATE, ENUM),
        ] {
            registry
                .register_template_string(name, source)
                .map_err(Box::new)?;
        }

        Ok(Self {
            registry,
            output: output.clone(),
        })
    }

    /// Render the generated header for `declarations`.
    ///
    /// `output_name` names the input file; its stem keys the include guard.
    pub fn render(&self, declarations: &[Declaration], output_name: &str) -> Result<String> {
        let mut body = String::new();
        for root in root_namespaces(declarations) {
            body.push_str(&format!("using namespace {}; ", root));
        }

        let blocks = declarations
            .iter()
            .filter_map(|decl| {
                if decl.is_class() {
                    Some(self.render_class(decl))
                } else if decl.is_enum() {
                    Some(self.render_enum(decl))
                } else {
                    None
                }
            })
            .collect::<Result<Vec<_>>>()?;
        body.push_str(&blocks.join(" "));

        let friends = declarations
            .iter()
            .filter(|decl| decl.is_class())
            .map(|decl| FriendView {
                name: decl.name.clone(),
                qualified: decl.qualified_name(),
            })
            .collect();

        let view = HeaderView {
            guard: format!("{}{}", self.output.guard_prefix, guard_stem(output_name)),
            includes: &self.output.includes,
            friends,
            body_macro: &self.output.body_macro,
            data_macro: &self.output.data_macro,
            meta: &self.output.meta_namespace,
            body: body.trim_end().to_string(),
        };

        Ok(self.registry.render(HEADER_TEMPLATE, &view)?)
    }

    fn render_class(&self, decl: &Declaration) -> Result<String> {
        let view = ClassView {
            meta: &self.output.meta_namespace,
            usage_enum: &self.output.usage_enum,
            qualified: decl.qualified_name(),
            display_name: &decl.display_name,
            fields: decl.properties.iter().map(field_view).collect(),
            refresh: decl.refresh.as_deref(),
        };
        Ok(self.registry.render(CLASS_TEMPLATE, &view)?)
    }

    fn render_enum(&self, decl: &Declaration) -> Result<String> {
        let qualified = decl.qualified_name();
        let entries = decl
            .enumerators
            .iter()
            .map(|e| EntryView {
                label: e.display_name.clone(),
                value: format!("{}{}{}", qualified, SCOPE_SEPARATOR, e.name),
            })
            .collect();

        let view = EnumView {
            meta: &self.output.meta_namespace,
            usage_enum: &self.output.usage_enum,
            dictionary: &self.output.dictionary_type,
            qualified,
            display_name: &decl.display_name,
            entries,
        };
        Ok(self.registry.render(ENUM_TEMPLATE, &view)?)
    }
}

/// Brace initializer of one `Field<Type, T>` entry
fn field_view(property: &Property) -> FieldView {
    let mut parts = vec![
        format!("\"{}\"", property.display_name),
        format!("&Type::{}", property.name),
        property.edit.clone(),
    ];
    parts.extend(property.args.iter().cloned());

    FieldView {
        ty: property.ty.clone(),
        initializer: format!("{{{}}}", parts.join(", ")),
    }
}

/// Distinct outermost namespaces, in order of first appearance.
///
/// Records nested only in classes contribute nothing.
fn root_namespaces(declarations: &[Declaration]) -> Vec<&str> {
    let mut roots: Vec<&str> = Vec::new();
    for root in declarations.iter().filter_map(Declaration::root_namespace) {
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    roots
}

/// File stem usable inside a macro name: `wsp_camera.hpp` -> `wsp_camera`
fn guard_stem(output_name: &str) -> String {
    Path::new(output_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
