//! Cached regex patterns shared by the loader, the style interpreter and the
//! classifier.
//!
//! Compiled once on first use through `LazyLock`.

use regex::Regex;
use std::sync::LazyLock;

// === Sanitizer ===

/// `<script>` elements with their bodies.
pub static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

/// `<noscript>` elements with their bodies.
pub static NOSCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<noscript\b[^>]*>.*?</noscript\s*>").unwrap());

/// `<style>` elements; group 1 is the stylesheet text.
pub static STYLE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").unwrap());

/// Inline event handlers (`onclick="..."`, `onload='...'`, `onerror=x`).
pub static EVENT_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

/// `href`/`src`/`action` attributes pointing at `javascript:` URLs.
pub static JS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(href|src|action)\s*=\s*(?:"\s*javascript:[^"]*"|'\s*javascript:[^']*'|javascript:[^\s>]*)"#,
    )
    .unwrap()
});

// === Heading text ===

pub static MD_BOLD_STARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
pub static MD_ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
pub static MD_BOLD_UNDERSCORES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
pub static MD_ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());

// === Video hosts ===

pub static YOUTUBE_EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com/embed/([a-zA-Z0-9_-]+)").unwrap());
pub static YOUTU_BE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtu\.be/([a-zA-Z0-9_-]+)").unwrap());
pub static VIMEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vimeo\.com/(?:video/)?(\d+)").unwrap());

// === Layout hints ===

/// `display: flex | grid` (also the inline- variants) in a style attribute.
pub static DISPLAY_FLEX_GRID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*(?:inline-)?(?:flex|grid)").unwrap());

/// Class words that mark a flex/grid container.
pub static FLEX_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:flex|grid|row|columns?)\b").unwrap());

// === CSS values ===

pub static GRADIENT_ANGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(-?\d+(?:\.\d+)?)deg").unwrap());

pub static GRADIENT_SIDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bto\s+(top|right|bottom|left)\b").unwrap());

/// A gradient color stop; group 1 is the color, group 2 the optional percentage.
pub static COLOR_STOP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(#[0-9a-f]{3,8}\b|rgba?\([^)]*\)|hsla?\([^)]*\))\s*(?:(\d+(?:\.\d+)?)%)?")
        .unwrap()
});

/// `url(...)` with optional quotes; group 1 is the URL.
pub static CSS_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)url\(\s*["']?([^"')]+)["']?\s*\)"#).unwrap());

/// A single color token: hex, functional notation or keyword.
pub static COLOR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:#[0-9a-f]{3,8}|rgba?\([^)]*\)|hsla?\([^)]*\)|[a-z]+)$").unwrap()
});

/// `border: <width>px <style> <color>`.
pub static BORDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?px)\s+(solid|dashed|dotted|double|groove|ridge|inset|outset)\s+(#[0-9a-f]{3,8}|rgba?\([^)]*\)|hsla?\([^)]*\)|[a-z]+)",
    )
    .unwrap()
});

/// `x y blur [spread] [color]` of a box or text shadow.
pub static SHADOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(-?[\d.]+)(?:px)?\s+(-?[\d.]+)(?:px)?\s+([\d.]+)(?:px)?(?:\s+(-?[\d.]+)(?:px)?)?(?:\s+(#[0-9a-f]{3,8}|rgba?\([^)]*\)|hsla?\([^)]*\)))?",
    )
    .unwrap()
});

/// One function of a `filter` value.
pub static FILTER_FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(blur|brightness|contrast|saturate|hue-rotate|invert|sepia|grayscale)\(\s*(-?[\d.]+)\s*(px|%|deg)?\s*\)",
    )
    .unwrap()
});

// === Theme detection ===

/// Hex colors declared through `color`, `background` or `background-color`.
pub static COLOR_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:background-color|background|color)\s*:\s*(#[0-9a-f]{3,8})\b").unwrap()
});

/// A Google Fonts stylesheet reference (v1 or css2 API).
pub static GOOGLE_FONTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)fonts\.googleapis\.com/css2?\?[^"'\s>]+"#).unwrap());
