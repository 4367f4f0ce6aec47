//! Identifier helpers shared by the targets.
//!
//! Every target builds its class, enum and variable names out of the same word
//! splitting; only the joining and the reserved-word escaping differ.

use std::collections::HashSet;

/// Split an arbitrary name into words.
///
/// Breaks on any non-alphanumeric character, on lower→upper transitions
/// (`petId` → `pet`, `Id`) and at the end of an acronym (`HTTPServer` →
/// `HTTP`, `Server`). Digits stay attached to the preceding word.
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// `list pets-by_owner` → `ListPetsByOwner`.
pub fn to_pascal_case(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|w| capitalize_first(&w.to_lowercase()))
        .collect()
}

/// `list pets-by_owner` → `listPetsByOwner`.
pub fn to_camel_case(name: &str) -> String {
    let mut result = String::new();
    for (i, word) in split_words(name).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            result.push_str(&lower);
        } else {
            result.push_str(&capitalize_first(&lower));
        }
    }
    result
}

/// `listPetsByOwner` → `list_pets_by_owner`.
pub fn to_snake_case(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Make sure an identifier does not start with a digit and is never empty.
pub fn ensure_leading_alpha(ident: String) -> String {
    match ident.chars().next() {
        None => "_empty".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{ident}"),
        Some(_) => ident,
    }
}

/// Apply `escape` to `ident` when it is a reserved word.
pub fn escape_reserved(
    ident: String,
    reserved: &HashSet<&'static str>,
    escape: impl Fn(&str) -> String,
) -> String {
    if reserved.contains(ident.as_str()) {
        escape(&ident)
    } else {
        ident
    }
}

/// Replace every `{placeholder}` of a route template with `rename(placeholder)`.
pub fn map_path_placeholders(path: &str, rename: impl Fn(&str) -> String) -> String {
    let mut result = String::with_capacity(path.len());
    let mut placeholder = String::new();
    let mut in_param = false;

    for c in path.chars() {
        match c {
            '{' if !in_param => {
                in_param = true;
                placeholder.clear();
            }
            '}' if in_param => {
                result.push_str(&rename(&placeholder));
                in_param = false;
            }
            _ if in_param => placeholder.push(c),
            _ => result.push(c),
        }
    }

    // Unterminated placeholder: keep it verbatim
    if in_param {
        result.push('{');
        result.push_str(&placeholder);
    }

    result
}
