//! Whole-page import: header and footer regions, body sections, and the
//! page's theme colors and fonts.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use url::Url;

use crate::assemble::{document_from_rows, rows_for, section, single_row, widths_row};
use crate::classify::{classify, looks_like_button};
use crate::context::ParseContext;
use crate::css::values::{first_font_family, parse_background, Background};
use crate::css::StyleSheet;
use crate::dom::{DomNode, CONTAINER_TAGS};
use crate::model::{Attrs, Document, Fraction, MenuItem, Module, ModuleVariant, Section, Spacing};
use crate::patterns::{COLOR_DECL_RE, GOOGLE_FONTS_RE};
use crate::style_map::StyleTarget;

const MAX_MENU_ITEMS: usize = 8;
const MAX_MENU_TITLE: usize = 30;
const MAX_CTA_TEXT: usize = 50;

/// Classes that say nothing about what a section is.
const GENERIC_SECTION_CLASSES: &[&str] = &["section", "container", "wrapper", "inner", "content"];

/// Class substrings of page-level wrappers that are descended through.
const PAGE_WRAPPER_HINTS: &[&str] = &[
    "wrapper", "page", "site", "app", "container", "content", "main", "layout",
];

const LOGO_HINTS: &[&str] = &["logo", "brand", "site-name"];
const MENU_HINTS: &[&str] = &["nav", "menu"];

/// Result of a whole-page import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullPage {
    pub header: Option<Document>,
    pub footer: Option<Document>,
    pub sections: Vec<Section>,
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub css_variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub background: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#6366f1".to_string(),
            secondary: "#3b82f6".to_string(),
            text: "#1e293b".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
        }
    }
}

impl FullPage {
    /// A page with no regions or sections; theme data still applies.
    pub fn blank(sheet: &StyleSheet, raw_markup: &str) -> Self {
        Self {
            header: None,
            footer: None,
            sections: Vec::new(),
            colors: extract_colors(sheet, raw_markup),
            fonts: extract_fonts(sheet, raw_markup),
            css_variables: resolved_variables(sheet),
        }
    }
}

/// Build the full page from the loaded `<body>`.
pub fn build_full_page(ctx: &mut ParseContext<'_>, root: &DomNode, raw_markup: &str) -> FullPage {
    let mut page = FullPage::blank(&ctx.sheet, raw_markup);
    let layout_root = descend_page_wrappers(root);

    let header_node = root
        .find_first(|n| n.tag == "header")
        .or_else(|| layout_root.element_children().find(|n| n.tag == "nav"));
    let footer_node = root.find_first(|n| n.tag == "footer");

    if let Some(header) = header_node {
        page.header = region(ctx, header, "header");
    }
    if let Some(footer) = footer_node {
        page.footer = region(ctx, footer, "footer");
    }

    let start = match root.find_first(|n| n.tag == "main") {
        Some(main) => descend_page_wrappers(main),
        None => layout_root,
    };
    page.sections = body_sections(ctx, start);

    tracing::debug!(
        header = page.header.is_some(),
        footer = page.footer.is_some(),
        sections = page.sections.len(),
        "built full page"
    );
    page
}

/// Follow a chain of sole, unclassed (or wrapper-classed) `div`/`main`
/// children.
fn descend_page_wrappers(node: &DomNode) -> &DomNode {
    let mut current = node;
    while let Some(inner) = sole_element_child(current) {
        let class = inner.class_attr();
        let is_wrapper = matches!(inner.tag.as_str(), "div" | "main")
            && (class.is_empty() || PAGE_WRAPPER_HINTS.iter().any(|h| class.contains(h)));
        if !is_wrapper {
            break;
        }
        current = inner;
    }
    current
}

fn sole_element_child(node: &DomNode) -> Option<&DomNode> {
    let mut elements = node.element_children();
    let first = elements.next()?;
    let loose_text = node
        .children
        .iter()
        .any(|c| c.is_text() && !c.text.trim().is_empty());
    (elements.next().is_none() && !loose_text).then_some(first)
}

fn is_region_tag(tag: &str) -> bool {
    matches!(tag, "header" | "footer" | "nav")
}

/// One section per container block; consecutive loose elements share one.
fn body_sections(ctx: &mut ParseContext<'_>, start: &DomNode) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut loose: Vec<&DomNode> = Vec::new();

    for child in &start.children {
        if child.is_element() && is_region_tag(&child.tag) {
            continue;
        }
        if child.is_element() && CONTAINER_TAGS.contains(&child.tag.as_str()) {
            sections.extend(loose_section(ctx, std::mem::take(&mut loose)));
            sections.extend(block_section(ctx, child));
        } else {
            loose.push(child);
        }
    }
    sections.extend(loose_section(ctx, loose));
    sections
}

fn content_section_attrs() -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert("padding".into(), Spacing::vertical("80px").into());
    attrs
}

fn block_section(ctx: &mut ParseContext<'_>, block: &DomNode) -> Option<Section> {
    let mut attrs = content_section_attrs();
    let pattern = block
        .classes()
        .into_iter()
        .find(|c| !GENERIC_SECTION_CLASSES.contains(&c.to_lowercase().as_str()));
    if let Some(pattern) = pattern {
        attrs.insert("_pattern".into(), pattern.into());
    }
    attrs.extend(ctx.styles(block, StyleTarget::Section));

    let rows = rows_for(ctx, block);
    if rows.is_empty() {
        return None;
    }
    Some(section(ctx, attrs, rows))
}

fn loose_section(ctx: &mut ParseContext<'_>, nodes: Vec<&DomNode>) -> Option<Section> {
    if nodes.is_empty() {
        return None;
    }
    let mut modules = Vec::new();
    for node in nodes {
        modules.extend(classify(ctx, node).into_modules());
    }
    let row = single_row(ctx, modules)?;
    Some(section(ctx, content_section_attrs(), vec![row]))
}

/// A header or footer region as its own full-width document.
fn region(ctx: &mut ParseContext<'_>, node: &DomNode, pattern: &str) -> Option<Document> {
    let mut attrs = Attrs::new();
    attrs.insert("_pattern".into(), pattern.into());
    attrs.insert("fullwidth".into(), true.into());
    attrs.insert("padding".into(), Spacing::vertical("20px").into());
    attrs.extend(ctx.styles(node, StyleTarget::Section));

    let rows = if pattern == "footer" && ctx.detect_columns(node).is_some() {
        rows_for(ctx, node)
    } else {
        match region_row(ctx, node) {
            Some(row) => vec![row],
            None => rows_for(ctx, node),
        }
    };

    let document = document_from_rows(ctx, attrs, rows);
    (!document.is_empty()).then_some(document)
}

/// Logo, menu and call-to-action columns; `None` when none of them exists.
fn region_row(ctx: &mut ParseContext<'_>, node: &DomNode) -> Option<crate::model::Row> {
    let logo_node = node.find_first(|n| {
        let class = n.class_attr();
        LOGO_HINTS.iter().any(|h| class.contains(h))
    });
    let is_menu = |n: &DomNode| {
        let class = n.class_attr();
        n.tag == "nav" || MENU_HINTS.iter().any(|h| class.contains(h))
    };
    // A bare <nav> standing in for the header is its own menu
    let menu_node = node
        .find_first(is_menu)
        .or_else(|| is_menu(node).then_some(node));

    let logo = logo_node.and_then(|n| site_logo(ctx, n));
    let menu = menu_node.and_then(|n| menu(ctx, n, logo_node));
    let cta = call_to_action(ctx, node, &[logo_node, menu_node]);

    let slots = [
        (Fraction::new(1, 4), logo),
        (Fraction::new(1, 2), menu),
        (Fraction::new(1, 4), cta),
    ];
    let filled: Vec<(Fraction, Module)> = slots
        .into_iter()
        .filter_map(|(width, module)| module.map(|m| (width, m)))
        .collect();

    let columns = match filled.len() {
        0 => return None,
        3 => filled
            .into_iter()
            .map(|(width, module)| (width, vec![module]))
            .collect(),
        n => {
            let width = if n == 1 {
                Fraction::FULL
            } else {
                Fraction::new(1, 2)
            };
            filled
                .into_iter()
                .map(|(_, module)| (width, vec![module]))
                .collect()
        }
    };
    widths_row(ctx, columns)
}

fn site_logo(ctx: &mut ParseContext<'_>, node: &DomNode) -> Option<Module> {
    let text = node.text_content();
    let image = if node.tag == "img" {
        Some(node)
    } else {
        node.find_first(|n| n.tag == "img")
    };

    if let Some(img) = image {
        let alt = match img.attr_or_empty("alt") {
            "" => text.as_str(),
            alt => alt,
        };
        let module = ctx
            .module(ModuleVariant::SiteLogo)
            .with_attr("logo", img.attr_or_empty("src"))
            .with_attr("logo_alt", alt)
            .with_attr("logo_url", "/");
        return Some(module);
    }
    if text.is_empty() {
        return None;
    }
    let module = ctx
        .module(ModuleVariant::SiteLogo)
        .with_attr("logo", "")
        .with_attr("logo_alt", text)
        .with_attr("logo_url", "/")
        .with_attr("text_only", true);
    Some(module)
}

fn menu(ctx: &mut ParseContext<'_>, node: &DomNode, logo: Option<&DomNode>) -> Option<Module> {
    let mut items = Vec::new();
    for link in node.find_all(|n| n.tag == "a") {
        if logo.is_some_and(|l| l.contains(link)) {
            continue;
        }
        let title = link.text_content();
        if title.is_empty() || title.chars().count() > MAX_MENU_TITLE {
            continue;
        }
        let url = match link.attr_or_empty("href") {
            "" => "#",
            href => href,
        };
        items.push(MenuItem {
            title,
            url: url.to_string(),
        });
        if items.len() == MAX_MENU_ITEMS {
            break;
        }
    }
    if items.is_empty() {
        return None;
    }
    let module = ctx
        .module(ModuleVariant::Menu)
        .with_attr("menu_style", "horizontal")
        .with_attr("menu_items", items);
    Some(module)
}

fn call_to_action(
    ctx: &mut ParseContext<'_>,
    node: &DomNode,
    skip: &[Option<&DomNode>],
) -> Option<Module> {
    let candidate = node
        .find_all(|n| n.tag == "button" || (n.tag == "a" && looks_like_button(n)))
        .into_iter()
        .filter(|n| !skip.iter().flatten().any(|s| s.contains(n)))
        .find(|n| {
            let len = n.text_content().chars().count();
            (1..=MAX_CTA_TEXT).contains(&len)
        })?;

    let href = match candidate.attr_or_empty("href") {
        "" => "#",
        href => href,
    };
    let mut module = ctx.module(ModuleVariant::Button);
    module.attrs = ctx.styles(candidate, StyleTarget::Button);
    let module = module
        .with_attr("text", candidate.text_content())
        .with_attr("link_url", href)
        .with_attr("link_target", candidate.attr_or_empty("target") == "_blank");
    Some(module)
}

fn resolved_variables(sheet: &StyleSheet) -> BTreeMap<String, String> {
    sheet
        .variables()
        .iter()
        .map(|(name, value)| (name.clone(), sheet.resolve(value)))
        .collect()
}

/// Theme colors: explicit custom properties first, then the most frequent
/// hex colors, then the `body` rule, then defaults.
pub fn extract_colors(sheet: &StyleSheet, raw_markup: &str) -> ThemeColors {
    let mut colors = ThemeColors::default();
    let variables = resolved_variables(sheet);

    let ranked = ranked_hex_colors(raw_markup);
    let body = sheet.rules_for("body");

    colors.primary = variable_color(&variables, &["primary"])
        .or_else(|| ranked.first().cloned())
        .unwrap_or(colors.primary);
    colors.secondary = variable_color(&variables, &["secondary", "accent"])
        .or_else(|| ranked.get(1).cloned())
        .unwrap_or(colors.secondary);
    colors.text = variable_color(&variables, &["text"])
        .or_else(|| body.get("color").cloned())
        .unwrap_or(colors.text);
    colors.background = variable_color(&variables, &["background", "bg"])
        .or_else(|| body_background(&body))
        .unwrap_or(colors.background);
    colors
}

/// First custom property whose name contains one of `hints` and whose
/// value is a color.
fn variable_color(variables: &BTreeMap<String, String>, hints: &[&str]) -> Option<String> {
    variables.iter().find_map(|(name, value)| {
        let name = name.to_ascii_lowercase();
        if hints.iter().any(|h| name.contains(h)) {
            color_of(value)
        } else {
            None
        }
    })
}

fn color_of(value: &str) -> Option<String> {
    match parse_background(value)? {
        Background::Color(color) => Some(color),
        _ => None,
    }
}

fn body_background(body: &HashMap<String, String>) -> Option<String> {
    body.get("background-color")
        .cloned()
        .or_else(|| body.get("background").and_then(|v| color_of(v)))
}

/// Hex colors of `color`/`background` declarations, most frequent first,
/// ties broken by first occurrence.
fn ranked_hex_colors(raw_markup: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for caps in COLOR_DECL_RE.captures_iter(raw_markup) {
        let color = caps[1].to_ascii_lowercase();
        match counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, n)) => *n += 1,
            None => counts.push((color, 1)),
        }
    }
    // Stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(color, _)| color).collect()
}

/// Theme fonts: a Google Fonts link first, then heading/body rules.
pub fn extract_fonts(sheet: &StyleSheet, raw_markup: &str) -> ThemeFonts {
    let mut fonts = ThemeFonts::default();

    let families = google_font_families(raw_markup);
    if let Some(first) = families.first() {
        fonts.heading = first.clone();
        fonts.body = families.get(1).unwrap_or(first).clone();
        return fonts;
    }

    let family_of = |selector: &str| {
        sheet
            .rules_for(selector)
            .get("font-family")
            .and_then(|v| first_font_family(v))
    };
    let body = family_of("body");
    let heading = ["h1", "h2", "h3"]
        .into_iter()
        .find_map(family_of)
        .or_else(|| body.clone());

    if let Some(heading) = heading {
        fonts.heading = heading;
    }
    if let Some(body) = body {
        fonts.body = body;
    }
    fonts
}

/// Families requested by the first Google Fonts stylesheet reference.
pub fn google_font_families(raw_markup: &str) -> Vec<String> {
    let Some(found) = GOOGLE_FONTS_RE.find(raw_markup) else {
        return Vec::new();
    };
    let href = found.as_str().replace("&amp;", "&");
    let Ok(url) = Url::parse(&format!("https://{href}")) else {
        return Vec::new();
    };

    url.query_pairs()
        .filter(|(key, _)| key == "family")
        .flat_map(|(_, value)| {
            value
                .split('|')
                .filter_map(|spec| {
                    let name = spec.split(':').next().unwrap_or("").trim();
                    (!name.is_empty()).then(|| name.to_string())
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
