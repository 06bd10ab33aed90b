//! Minimal CSS rule parser and selector matcher.
//! Supports: tag, .class, #id, [attr], [attr=value], compounds, combinators
//! (parsed; only the subject compound is matched), comma-separated lists and
//! specificity ordering.

use crate::dom::DomNode;

/// A parsed CSS rule: one selector + its raw declarations.
#[derive(Debug, Clone)]
pub struct CssRule {
    pub selector: Selector,
    pub declarations: String, // raw "property: value; ..." string
    pub specificity: u32,
    /// Position in the stylesheet; breaks specificity ties.
    pub order: usize,
}

/// A single selector (one part of a comma-separated list).
#[derive(Debug, Clone)]
pub struct Selector {
    pub text: String,
    pub parts: Vec<SelectorPart>,
    pub specificity: u32,
}

/// A component of a selector chain.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    /// Matches a tag name: `div`, `button`, etc.
    Tag(String),
    /// Matches a class: `.foo`
    Class(String),
    /// Matches an ID: `#bar`
    Id(String),
    /// Matches an attribute: `[type="submit"]`
    Attribute(String, Option<String>),
    /// Descendant combinator (space)
    Descendant,
    /// Child combinator (>)
    Child,
    /// Sibling combinators (+, ~)
    Sibling,
    /// Universal selector (*)
    Universal,
    /// Pseudo-class or pseudo-element
    PseudoClass(String),
}

/// Output of [`parse_stylesheet`].
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub rules: Vec<CssRule>,
    /// Selector texts that could not be parsed.
    pub skipped: Vec<String>,
}

/// Parse a CSS stylesheet string into rules, in source order.
///
/// `@`-rules are skipped with their nested bodies. Statement at-rules
/// (`@import ...;`, `@charset ...;`) end at their top-level semicolon.
pub fn parse_stylesheet(css: &str) -> ParsedSheet {
    let mut sheet = ParsedSheet::default();
    let css = strip_comments(css);

    // Simple state machine: find selector { declarations }
    let mut chars = css.chars().peekable();
    let mut current = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                let selector_str = current.trim().to_string();
                current.clear();

                // Read until closing brace
                let mut depth = 1;
                let mut declarations = String::new();
                for c in chars.by_ref() {
                    if c == '{' {
                        depth += 1;
                    } else if c == '}' {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    declarations.push(c);
                }

                if selector_str.is_empty() || selector_str.starts_with('@') {
                    continue;
                }

                // Parse comma-separated selectors
                for sel_str in split_selector_list(&selector_str) {
                    match parse_selector(&sel_str) {
                        Some(selector) => sheet.rules.push(CssRule {
                            specificity: selector.specificity,
                            selector,
                            declarations: declarations.trim().to_string(),
                            order: sheet.rules.len(),
                        }),
                        None => sheet.skipped.push(sel_str),
                    }
                }
            }
            ';' => current.clear(),
            '}' => current.clear(), // stray close brace
            _ => current.push(ch),
        }
    }

    sheet
}

/// Split a selector list on commas outside brackets and parentheses.
fn split_selector_list(list: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in list.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth <= 0 => {
                let piece = current.trim();
                if !piece.is_empty() {
                    out.push(piece.to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    let piece = current.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
    out
}

fn strip_comments(css: &str) -> String {
    let mut result = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            // Skip until */
            while let Some(inner) = chars.next() {
                if inner == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Parse a single selector string into a Selector.
pub fn parse_selector(input: &str) -> Option<Selector> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    let mut specificity: u32 = 0;
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            '.' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                let class_name = read_ident(&mut chars);
                if class_name.is_empty() {
                    return None;
                }
                parts.push(SelectorPart::Class(class_name));
                specificity += 10;
            }
            '#' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                let id_name = read_ident(&mut chars);
                if id_name.is_empty() {
                    return None;
                }
                parts.push(SelectorPart::Id(id_name));
                specificity += 100;
            }
            '[' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                let (name, value) = read_attribute(&mut chars)?;
                parts.push(SelectorPart::Attribute(name, value));
                specificity += 10;
            }
            ':' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                // :: for pseudo-elements
                if chars.peek() == Some(&':') {
                    chars.next();
                }
                let pseudo = read_ident(&mut chars);
                // Skip function arguments like :not(...)
                if chars.peek() == Some(&'(') {
                    chars.next();
                    let mut depth = 1;
                    for c in chars.by_ref() {
                        if c == '(' {
                            depth += 1;
                        } else if c == ')' {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                    }
                }
                parts.push(SelectorPart::PseudoClass(pseudo.to_lowercase()));
                specificity += 10;
            }
            '>' | '+' | '~' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                skip_whitespace(&mut chars);
                // A leading space already pushed a descendant marker
                if matches!(parts.last(), Some(SelectorPart::Descendant)) {
                    parts.pop();
                }
                parts.push(if ch == '>' {
                    SelectorPart::Child
                } else {
                    SelectorPart::Sibling
                });
            }
            c if c.is_whitespace() => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                skip_whitespace(&mut chars);
                if let Some(&next) = chars.peek() {
                    if !matches!(next, '>' | '+' | '~') {
                        parts.push(SelectorPart::Descendant);
                    }
                }
            }
            '*' => {
                flush_tag(&mut current, &mut parts, &mut specificity);
                chars.next();
                parts.push(SelectorPart::Universal);
            }
            c if c.is_alphanumeric() || c == '-' || c == '_' => {
                current.push(c);
                chars.next();
            }
            _ => return None,
        }
    }

    flush_tag(&mut current, &mut parts, &mut specificity);

    if parts.is_empty() || is_combinator(parts.last()?) {
        return None;
    }
    Some(Selector {
        text: input.to_string(),
        parts,
        specificity,
    })
}

fn is_combinator(part: &SelectorPart) -> bool {
    matches!(
        part,
        SelectorPart::Descendant | SelectorPart::Child | SelectorPart::Sibling
    )
}

fn read_attribute(
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Option<(String, Option<String>)> {
    let mut attr = String::new();
    let mut value = None;
    loop {
        let c = chars.next()?;
        match c {
            ']' => break,
            '=' => {
                // Operators like ^= or *= degrade to plain equality on the name
                let name = attr.trim_end_matches(['^', '$', '*', '~', '|']).to_string();
                attr = name;
                let mut val = String::new();
                let quote = chars.peek().copied().filter(|q| *q == '"' || *q == '\'');
                if let Some(q) = quote {
                    chars.next();
                    for vc in chars.by_ref() {
                        if vc == q {
                            break;
                        }
                        val.push(vc);
                    }
                    // closing bracket
                    for vc in chars.by_ref() {
                        if vc == ']' {
                            break;
                        }
                    }
                    value = Some(val);
                    break;
                }
                while let Some(&vc) = chars.peek() {
                    chars.next();
                    if vc == ']' {
                        break;
                    }
                    val.push(vc);
                }
                value = Some(val.trim().to_string());
                break;
            }
            _ => attr.push(c),
        }
    }
    let name = attr.trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some((name, value))
    }
}

fn flush_tag(current: &mut String, parts: &mut Vec<SelectorPart>, specificity: &mut u32) {
    let tag = current.trim().to_string();
    if !tag.is_empty() {
        parts.push(SelectorPart::Tag(tag.to_lowercase()));
        *specificity += 1;
        current.clear();
    }
}

fn read_ident(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars>) {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}

impl Selector {
    /// The rightmost compound: the parts describing the element itself.
    pub fn subject(&self) -> &[SelectorPart] {
        let start = self
            .parts
            .iter()
            .rposition(is_combinator)
            .map_or(0, |i| i + 1);
        &self.parts[start..]
    }

    pub fn has_pseudo(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, SelectorPart::PseudoClass(_)))
    }

    /// Whether this is exactly `:root`.
    pub fn is_root(&self) -> bool {
        matches!(self.parts.as_slice(), [SelectorPart::PseudoClass(p)] if p == "root")
    }

    /// Whether every part of the subject compound is present in `query`.
    /// A subject naming nothing but `*` is a page-wide reset and never
    /// applies to individual elements.
    pub fn applies_to(&self, query: &SelectorQuery) -> bool {
        let subject = self.subject();
        if subject.iter().all(|p| *p == SelectorPart::Universal) {
            return false;
        }
        subject.iter().all(|part| match part {
            SelectorPart::Tag(t) => query.tag.as_deref() == Some(t.as_str()),
            SelectorPart::Class(c) => query.classes.iter().any(|cl| cl == c),
            SelectorPart::Id(i) => query.id.as_deref() == Some(i.as_str()),
            SelectorPart::Attribute(name, expected) => {
                match query.attributes.iter().find(|(k, _)| k == name) {
                    Some((_, actual)) => expected.as_ref().map_or(true, |e| e == actual),
                    None => false,
                }
            }
            SelectorPart::Universal => true,
            SelectorPart::PseudoClass(_) => false,
            SelectorPart::Descendant | SelectorPart::Child | SelectorPart::Sibling => true,
        })
    }
}

/// What is known about the element a rule lookup is for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorQuery {
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub attributes: Vec<(String, String)>,
}

impl SelectorQuery {
    /// Describe an element by its tag, classes, id and attributes.
    pub fn for_element(node: &DomNode) -> Self {
        Self {
            tag: Some(node.tag.clone()).filter(|t| !t.is_empty()),
            classes: node.classes(),
            id: node.id_attr().map(str::to_string),
            attributes: node.attributes.clone(),
        }
    }

    /// Describe an element by a simple/compound selector such as
    /// `h1`, `.hero` or `a.btn.primary`. Only the subject compound counts.
    pub fn parse(selector: &str) -> Option<Self> {
        let parsed = parse_selector(selector)?;
        let mut query = SelectorQuery::default();
        for part in parsed.subject() {
            match part {
                SelectorPart::Tag(t) => query.tag = Some(t.clone()),
                SelectorPart::Class(c) => query.classes.push(c.clone()),
                SelectorPart::Id(i) => query.id = Some(i.clone()),
                SelectorPart::Attribute(name, value) => query
                    .attributes
                    .push((name.clone(), value.clone().unwrap_or_default())),
                _ => {}
            }
        }
        Some(query)
    }
}
