//! Handlebars templates for the generated header.
//!
//! Class and enum blocks render to a single line each: they are spliced into
//! the body of a one-line `#define`, so they must not contain newlines.

pub const HEADER_TEMPLATE: &str = "header";
pub const CLASS_TEMPLATE: &str = "class";
pub const ENUM_TEMPLATE: &str = "enum";

pub const HEADER: &str = r#"#ifndef {{guard}}
#define {{guard}}

{{#each includes}}
#include <{{this}}>
{{/each}}

{{#each friends}}
#define {{@root.body_macro}}${{name}}() friend struct {{@root.meta}}::Meta<{{qualified}}>;
{{/each}}

#undef {{data_macro}}
#define {{data_macro}}() \
{{body}}

#endif
"#;

pub const CLASS: &str = concat!(
    "template <> struct {{meta}}::Meta<{{qualified}}> { ",
    "static constexpr char const * name = \"{{display_name}}\"; ",
    "static constexpr {{meta}}::{{usage_enum}} usage = {{meta}}::{{usage_enum}}::eClass; ",
    "using Type = {{qualified}}; ",
    "static constexpr auto fields = std::make_tuple(",
    "{{#each fields}}{{@root.meta}}::Field<Type, {{ty}}>{{initializer}}{{#unless @last}}, {{/unless}}{{/each}}",
    "); ",
    "{{#if refresh}}",
    "static constexpr bool hasRefresh = true; static constexpr auto refreshFunc = &Type::{{refresh}};",
    "{{else}}",
    "static constexpr bool hasRefresh = false;",
    "{{/if}}",
    " };",
);

pub const ENUM: &str = concat!(
    "template <> struct {{meta}}::Meta<{{qualified}}> { ",
    "static constexpr char const * name = \"{{display_name}}\"; ",
    "static constexpr {{meta}}::{{usage_enum}} usage = {{meta}}::{{usage_enum}}::eEnum; ",
    "}; ",
    "template <> inline const {{dictionary}}<std::string, {{qualified}}>& {{meta}}::EnumDictionary() { ",
    "static const {{dictionary}}<std::string, {{qualified}}> dict = { ",
    "{{#each entries}}{ \"{{label}}\", {{value}} }{{#unless @last}}, {{/unless}}{{/each}}",
    " }; return dict; }",
);
