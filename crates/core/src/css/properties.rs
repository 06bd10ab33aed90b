//! Declaration splitting and custom-property resolution.

use std::collections::HashMap;

/// Deepest chain of `var()` references followed before giving up.
const MAX_VAR_DEPTH: usize = 16;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Split a declaration block on semicolons outside parentheses and quotes,
/// so `url(data:image/png;base64,...)` stays in one piece.
pub(crate) fn split_declarations(block: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in block.char_indices() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => {}
            ('(', None) => depth += 1,
            (')', None) => depth = (depth - 1).max(0),
            (';', None) if depth == 0 => {
                out.push(&block[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&block[start..]);
    out
}

/// Parse a declaration block into ordered declarations.
///
/// Property names are lower-cased, `!important` is stripped and empty
/// declarations are dropped. Fragments without a `:` are returned in the
/// second list.
pub fn parse_declarations(block: &str) -> (Vec<Declaration>, Vec<String>) {
    let mut declarations = Vec::new();
    let mut malformed = Vec::new();

    for declaration in split_declarations(block) {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let Some((property, raw_value)) = declaration.split_once(':') else {
            malformed.push(declaration.to_string());
            continue;
        };
        let property = property.trim().to_lowercase();
        let value = strip_important(raw_value.trim());
        if property.is_empty() || value.is_empty() {
            continue;
        }
        declarations.push(Declaration {
            property,
            value: value.to_string(),
        });
    }

    (declarations, malformed)
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(pos) if lower[pos..].trim() == "!important" => value[..pos].trim_end(),
        _ => value,
    }
}

/// Resolve `var(--name)` and `var(--name, fallback)` references in a CSS
/// value. `variables` is keyed without the leading `--`.
pub fn resolve_vars(value: &str, variables: &HashMap<String, String>) -> String {
    resolve_vars_at(value, variables, 0)
}

fn resolve_vars_at(value: &str, variables: &HashMap<String, String>, depth: usize) -> String {
    if !value.contains("var(") || depth >= MAX_VAR_DEPTH {
        return value.to_string();
    }

    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find("var(") {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 4..];

        // Read var content until matching ')'
        let mut depth_parens = 1;
        let mut end = after.len();
        for (i, c) in after.char_indices() {
            if c == '(' {
                depth_parens += 1;
            } else if c == ')' {
                depth_parens -= 1;
                if depth_parens == 0 {
                    end = i;
                    break;
                }
            }
        }
        let content = &after[..end];
        rest = after.get(end + 1..).unwrap_or("");

        let (name, fallback) = match content.split_once(',') {
            Some((name, fb)) => (name.trim(), Some(fb.trim())),
            None => (content.trim(), None),
        };
        let key = name.trim_start_matches("--");

        if let Some(val) = variables.get(key) {
            // Variables can reference other variables
            result.push_str(&resolve_vars_at(val, variables, depth + 1));
        } else if let Some(fb) = fallback {
            result.push_str(&resolve_vars_at(fb, variables, depth + 1));
        }
        // Neither found: the reference resolves to nothing
    }

    result.push_str(rest);
    result.trim().to_string()
}
