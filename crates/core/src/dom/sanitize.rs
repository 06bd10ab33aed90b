//! Textual sanitization and loading of raw markup.

use super::{parse_html, DomNode};
use crate::patterns::{EVENT_HANDLER_RE, JS_URL_RE, NOSCRIPT_RE, SCRIPT_RE, STYLE_BLOCK_RE};

/// Result of loading one markup string.
#[derive(Debug, Clone)]
pub enum LoadedMarkup {
    /// Nothing left after sanitization.
    Empty,
    /// The parsed `<body>` and the sanitized markup it came from.
    Tree { root: DomNode, markup: String },
}

impl LoadedMarkup {
    pub fn is_empty(&self) -> bool {
        matches!(self, LoadedMarkup::Empty)
    }
}

/// Strip executable and presentational blocks, inline handlers and
/// `javascript:` URLs, then trim.
pub fn sanitize_markup(markup: &str) -> String {
    let out = SCRIPT_RE.replace_all(markup, "");
    let out = NOSCRIPT_RE.replace_all(&out, "");
    let out = STYLE_BLOCK_RE.replace_all(&out, "");
    let out = EVENT_HANDLER_RE.replace_all(&out, "");
    let out = JS_URL_RE.replace_all(&out, r##"${1}="#""##);
    out.trim().to_string()
}

/// Sanitize and parse markup.
pub fn load(markup: &str) -> LoadedMarkup {
    let sanitized = sanitize_markup(markup);
    if sanitized.is_empty() {
        return LoadedMarkup::Empty;
    }

    let root = parse_html(&sanitized);
    tracing::trace!(bytes = sanitized.len(), "parsed sanitized markup");
    LoadedMarkup::Tree {
        root,
        markup: sanitized,
    }
}
