//! Annotation argument splitting.

use crate::config::ArgumentSplit;

/// Split an annotation argument list into trimmed arguments.
///
/// `DepthAware` only splits on commas outside `()`, `[]`, `{}`, `<>` and
/// string or char literals, so `eSlider, Clamp(0, 1), "%d, %d"` is three
/// arguments. `Naive` splits on every comma. An empty list yields `[""]` in
/// both modes, which callers read as "no override".
pub fn split_arguments(text: &str, mode: ArgumentSplit) -> Vec<String> {
    match mode {
        ArgumentSplit::Naive => text.split(',').map(|arg| arg.trim().to_string()).collect(),
        ArgumentSplit::DepthAware => split_depth_aware(text),
    }
}

fn split_depth_aware(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(text[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(text[start..].trim().to_string());

    args
}
