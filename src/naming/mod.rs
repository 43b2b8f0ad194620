//! Identifier prettifying for display labels.
//!
//! # Word Segmentation
//!
//! After `_` becomes a space, words are the runs matched by
//!
//! 1. an optional uppercase letter followed by one or more lowercase letters
//!    (`Health`, `radius`), or
//! 2. a run of uppercase letters not followed by a lowercase letter
//!    (`MAX`, the `HTTP` in `HTTPServer`).
//!
//! Anything else (spaces, digits, punctuation) separates words and is dropped.
//! Each word is capitalized and words are joined with single spaces.

/// Prettify a type name: `InputManager` -> `Input Manager`
pub fn prettify(identifier: &str) -> String {
    segment(&identifier.replace('_', " "))
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prettify a property or enumerator name.
///
/// Drops a leading `e`/`b` prefix when it is directly followed by an uppercase
/// letter (`eNorth` -> `North`, `bEnabled` -> `Enabled`).
pub fn prettify_member(identifier: &str) -> String {
    prettify(strip_member_prefix(identifier))
}

fn strip_member_prefix(identifier: &str) -> &str {
    let bytes = identifier.as_bytes();
    if bytes.len() >= 2 && matches!(bytes[0], b'e' | b'b') && bytes[1].is_ascii_uppercase() {
        &identifier[1..]
    } else {
        identifier
    }
}

fn segment(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut words = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c.is_ascii_lowercase()
            || (c.is_ascii_uppercase() && bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase))
        {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                i += 1;
            }
            words.push(&text[start..i]);
        } else if c.is_ascii_uppercase() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_uppercase() {
                i += 1;
            }
            // Give the last capital back when it starts a lowercase word
            if bytes.get(i).is_some_and(u8::is_ascii_lowercase) {
                i -= 1;
            }
            words.push(&text[start..i]);
        } else {
            i += 1;
        }
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cases() {
        assert_eq!(prettify("radius"), "Radius");
        assert_eq!(prettify("MAX_HEALTH"), "Max Health");
        assert_eq!(prettify("InputManager"), "Input Manager");
        assert_eq!(prettify("shadow_map_radius"), "Shadow Map Radius");
        assert_eq!(prettify("isActive"), "Is Active");
    }

    #[test]
    fn test_acronyms_stay_together() {
        assert_eq!(prettify("HTTPServer"), "Http Server");
        assert_eq!(prettify("parseURL"), "Parse Url");
    }

    #[test]
    fn test_leading_underscore_member() {
        assert_eq!(prettify_member("_buttonUsage"), "Button Usage");
        assert_eq!(prettify_member("_fov"), "Fov");
    }

    #[test]
    fn test_member_prefix_stripping() {
        assert_eq!(prettify_member("bEnabled"), "Enabled");
        assert_eq!(prettify_member("eNorth"), "North");
        assert_eq!(prettify_member("ePressed"), "Pressed");
        // Only e/b prefixes are stripped
        assert_eq!(prettify_member("isActive"), "Is Active");
        // Lowercase continuation is a normal word
        assert_eq!(prettify_member("enabled"), "Enabled");
        assert_eq!(prettify_member("b"), "B");
    }

    #[test]
    fn test_plain_variant_keeps_prefix() {
        assert_eq!(prettify("eNorth"), "E North");
    }

    #[test]
    fn test_digits_are_dropped() {
        assert_eq!(prettify("vec3Position"), "Vec Position");
    }

    #[test]
    fn test_empty() {
        assert_eq!(prettify(""), "");
        assert_eq!(prettify_member(""), "");
        assert_eq!(prettify("___"), "");
    }
}
