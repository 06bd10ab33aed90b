//! Element → module classification.

use crate::context::ParseContext;
use crate::css::parse_inline_style;
use crate::dom::{escape_html, DomNode, NodeType};
use crate::error::{DemoteReason, Diagnostic, DropReason};
use crate::model::{Module, ModuleVariant};
use crate::patterns::{
    MD_BOLD_STARS_RE, MD_BOLD_UNDERSCORES_RE, MD_ITALIC_STAR_RE, MD_ITALIC_UNDERSCORE_RE,
    VIMEO_RE, YOUTUBE_EMBED_RE, YOUTU_BE_RE,
};
use crate::style_map::StyleTarget;

/// Outcome of classifying one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Dropped(DropReason),
    Single(Module),
    Many(Vec<Module>),
}

impl Classification {
    pub fn into_modules(self) -> Vec<Module> {
        match self {
            Classification::Dropped(_) => Vec::new(),
            Classification::Single(module) => vec![module],
            Classification::Many(modules) => modules,
        }
    }
}

/// How a tag is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagGroup {
    Heading,
    Paragraph,
    Image,
    Verbatim,
    Link,
    Frame,
    Rule,
    Container,
    Caption,
    Preformatted,
    Complex,
    Inline,
    LineBreak,
    Other,
}

fn tag_group(tag: &str) -> TagGroup {
    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => TagGroup::Heading,
        "p" => TagGroup::Paragraph,
        "img" => TagGroup::Image,
        "ul" | "ol" | "blockquote" => TagGroup::Verbatim,
        "a" => TagGroup::Link,
        "iframe" => TagGroup::Frame,
        "hr" => TagGroup::Rule,
        "div" | "section" | "article" | "main" | "aside" | "header" | "footer" | "figure" => {
            TagGroup::Container
        }
        "figcaption" => TagGroup::Caption,
        "pre" | "code" => TagGroup::Preformatted,
        "table" | "form" => TagGroup::Complex,
        "span" | "strong" | "em" | "b" | "i" | "u" | "small" | "mark" => TagGroup::Inline,
        "br" => TagGroup::LineBreak,
        _ => TagGroup::Other,
    }
}

/// Classify one node, recording every drop and demotion on the context.
/// Containers recurse and flatten their children.
pub fn classify(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    let result = match node.node_type {
        NodeType::Text => classify_text(ctx, node),
        NodeType::Document => Classification::Many(classify_children(ctx, node)),
        NodeType::Element => match tag_group(&node.tag) {
            TagGroup::Heading => Classification::Single(heading(ctx, node)),
            TagGroup::Paragraph => paragraph(ctx, node),
            TagGroup::Image => image(ctx, node),
            TagGroup::Verbatim => Classification::Single(styled_text(ctx, node, node.outer_html())),
            TagGroup::Link => link(ctx, node),
            TagGroup::Frame => frame(ctx, node),
            TagGroup::Rule => Classification::Single(ctx.module(ModuleVariant::Divider)),
            TagGroup::Container => container(ctx, node),
            TagGroup::Caption => Classification::Dropped(DropReason::Caption),
            TagGroup::Preformatted => Classification::Single(code(ctx, node.outer_html())),
            TagGroup::Complex => demote(ctx, node, DemoteReason::ComplexStructure),
            TagGroup::Inline => {
                let content = format!("<p>{}</p>", node.outer_html());
                Classification::Single(styled_text(ctx, node, content))
            }
            TagGroup::LineBreak => Classification::Dropped(DropReason::LineBreak),
            TagGroup::Other => other(ctx, node),
        },
    };

    if let Classification::Dropped(reason) = &result {
        // Whitespace between tags is formatting, not lost content
        if *reason != DropReason::WhitespaceText {
            ctx.note(Diagnostic::dropped(tag_label(node), *reason));
        }
    }
    result
}

/// Classify every child of `node` in document order, flattening the results.
pub fn classify_children(ctx: &mut ParseContext<'_>, node: &DomNode) -> Vec<Module> {
    let mut modules = Vec::new();
    for child in &node.children {
        modules.extend(classify(ctx, child).into_modules());
    }
    modules
}

fn tag_label(node: &DomNode) -> &str {
    match node.node_type {
        NodeType::Text => "#text",
        NodeType::Document => "#document",
        NodeType::Element => &node.tag,
    }
}

fn classify_text(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    let text = node.text.trim();
    if text.is_empty() {
        return Classification::Dropped(DropReason::WhitespaceText);
    }
    let module = ctx
        .module(ModuleVariant::Text)
        .with_attr("content", format!("<p>{}</p>", escape_html(text)));
    Classification::Single(module)
}

/// Remove `**bold**`, `*italic*`, `__bold__` and `_italic_` markers.
pub fn strip_markdown(text: &str) -> String {
    let text = MD_BOLD_STARS_RE.replace_all(text, "$1");
    let text = MD_ITALIC_STAR_RE.replace_all(&text, "$1");
    let text = MD_BOLD_UNDERSCORES_RE.replace_all(&text, "$1");
    let text = MD_ITALIC_UNDERSCORE_RE.replace_all(&text, "$1");
    text.into_owned()
}

/// Start a module carrying the element's mapped styles; core attributes are
/// set afterwards and win over styles.
fn styled(ctx: &mut ParseContext<'_>, variant: ModuleVariant, node: &DomNode) -> Module {
    let target = if variant == ModuleVariant::Button {
        StyleTarget::Button
    } else {
        StyleTarget::Module
    };
    let styles = ctx.styles(node, target);
    let mut module = ctx.module(variant);
    module.attrs = styles;
    module
}

fn styled_text(ctx: &mut ParseContext<'_>, node: &DomNode, content: String) -> Module {
    styled(ctx, ModuleVariant::Text, node).with_attr("content", content)
}

fn heading(ctx: &mut ParseContext<'_>, node: &DomNode) -> Module {
    let text = strip_markdown(&node.text_content());
    styled(ctx, ModuleVariant::Heading, node)
        .with_attr("text", text)
        .with_attr("level", node.tag.as_str())
}

fn paragraph(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    if node.text_content().is_empty() {
        return Classification::Dropped(DropReason::EmptyParagraph);
    }
    let content = format!("<p>{}</p>", node.inner_html().trim());
    Classification::Single(styled_text(ctx, node, content))
}

fn image(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    let src = node.attr_or_empty("src");
    if src.is_empty() {
        return Classification::Dropped(DropReason::MissingImageSource);
    }
    let module = styled(ctx, ModuleVariant::Image, node)
        .with_attr("src", src)
        .with_attr("alt", node.attr_or_empty("alt"))
        .with_attr("align", "center");
    Classification::Single(module)
}

/// A link styled or classed like a call to action.
pub fn looks_like_button(node: &DomNode) -> bool {
    let class = node.class_attr();
    if ["btn", "button", "cta", "action"]
        .iter()
        .any(|hint| class.contains(hint))
    {
        return true;
    }
    let style = parse_inline_style(node.attr_or_empty("style"));
    style.keys().any(|k| k.starts_with("background")) && style.keys().any(|k| k.starts_with("padding"))
}

fn link(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    if !looks_like_button(node) {
        let content = format!("<p>{}</p>", node.outer_html());
        return Classification::Single(styled_text(ctx, node, content));
    }
    let href = match node.attr_or_empty("href") {
        "" => "#",
        href => href,
    };
    let module = styled(ctx, ModuleVariant::Button, node)
        .with_attr("text", node.text_content())
        .with_attr("link_url", href)
        .with_attr("link_target", node.attr_or_empty("target") == "_blank");
    Classification::Single(module)
}

/// `(video_type, watch URL)` for a YouTube or Vimeo embed source.
pub fn video_source(src: &str) -> Option<(&'static str, String)> {
    if let Some(caps) = YOUTUBE_EMBED_RE
        .captures(src)
        .or_else(|| YOUTU_BE_RE.captures(src))
    {
        return Some((
            "youtube",
            format!("https://www.youtube.com/watch?v={}", &caps[1]),
        ));
    }
    VIMEO_RE
        .captures(src)
        .map(|caps| ("vimeo", format!("https://vimeo.com/{}", &caps[1])))
}

fn frame(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    match video_source(node.attr_or_empty("src")) {
        Some((video_type, url)) => {
            let module = ctx
                .module(ModuleVariant::Video)
                .with_attr("video_type", video_type)
                .with_attr("video_url", url);
            Classification::Single(module)
        }
        None => demote(ctx, node, DemoteReason::UnrecognizedVideoHost),
    }
}

fn container(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    if !node.has_content() {
        return Classification::Dropped(DropReason::EmptyContainer);
    }
    Classification::Many(classify_children(ctx, node))
}

pub(crate) fn code(ctx: &mut ParseContext<'_>, markup: String) -> Module {
    ctx.module(ModuleVariant::Code)
        .with_attr("raw_content", markup)
}

fn demote(ctx: &mut ParseContext<'_>, node: &DomNode, reason: DemoteReason) -> Classification {
    ctx.note(Diagnostic::demoted(&node.tag, reason));
    Classification::Single(code(ctx, node.outer_html()))
}

fn other(ctx: &mut ParseContext<'_>, node: &DomNode) -> Classification {
    if node.text_content().is_empty() {
        return Classification::Dropped(DropReason::EmptyElement);
    }
    demote(ctx, node, DemoteReason::UnknownTag)
}
