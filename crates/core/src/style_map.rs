//! Maps raw CSS properties onto the builder's attribute schema.

use crate::css::values::{
    first_font_family, leading_int, parse_background, parse_border, parse_box, parse_corners,
    parse_filters, parse_shadow, Background,
};
use crate::css::{PropertyMap, StyleSheet};
use crate::dom::DomNode;
use crate::model::{AttrValue, Attrs, Spacing};

/// What the mapped attributes are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    Section,
    Module,
    /// A module that also receives the `button_*` aliases.
    Button,
}

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Translate one property map. Missing or unreadable properties simply
/// contribute nothing.
pub fn map_styles(props: &PropertyMap, target: StyleTarget) -> Attrs {
    let mut attrs = Attrs::new();
    if props.is_empty() {
        return attrs;
    }

    if target != StyleTarget::Section {
        map_typography(props, &mut attrs);
    }
    map_background(props, &mut attrs);
    map_spacing(props, &mut attrs);
    map_border(props, &mut attrs);
    map_shadow(props, "box-shadow", "box_shadow", &mut attrs);
    if target == StyleTarget::Section {
        map_sizing(props, &mut attrs);
    } else if let Some(min_height) = props.get("min-height") {
        attrs.insert("min_height".into(), min_height.as_str().into());
    }
    map_filters(props, &mut attrs);
    map_position(props, &mut attrs);
    map_overflow(props, &mut attrs);
    if target == StyleTarget::Button {
        map_button_aliases(props, &mut attrs);
    }
    attrs
}

/// Stylesheet layer first, then the inline layer on top.
pub fn element_styles(sheet: &StyleSheet, node: &DomNode, target: StyleTarget) -> Attrs {
    map_styles(&sheet.computed_style(node), target)
}

fn put(attrs: &mut Attrs, key: &str, value: impl Into<AttrValue>) {
    attrs.insert(key.to_string(), value.into());
}

fn map_background(props: &PropertyMap, attrs: &mut Attrs) {
    if let Some(color) = props.get("background-color") {
        put(attrs, "background_type", "color");
        put(attrs, "background_color", color.as_str());
    }

    let shorthand = props
        .get("background")
        .or_else(|| props.get("background-image"));
    match shorthand.and_then(|v| parse_background(v)) {
        Some(Background::Gradient(gradient)) => {
            put(attrs, "background_type", "gradient");
            put(attrs, "background_gradient_type", gradient.kind);
            put(attrs, "background_gradient_direction", gradient.direction);
            if !gradient.stops.is_empty() {
                put(attrs, "background_gradient_stops", gradient.stops);
            }
        }
        Some(Background::Image(url)) => {
            put(attrs, "background_type", "image");
            put(attrs, "background_image", url);
        }
        Some(Background::Color(color)) => {
            put(attrs, "background_type", "color");
            put(attrs, "background_color", color);
        }
        None => {}
    }

    for (property, key) in [
        ("background-size", "background_size"),
        ("background-position", "background_position"),
        ("background-repeat", "background_repeat"),
    ] {
        if let Some(value) = props.get(property) {
            put(attrs, key, value.as_str());
        }
    }
    if props
        .get("background-attachment")
        .is_some_and(|v| v.eq_ignore_ascii_case("fixed"))
    {
        put(attrs, "parallax", true);
    }
}

fn map_spacing(props: &PropertyMap, attrs: &mut Attrs) {
    for box_name in ["padding", "margin"] {
        let mut spacing = props
            .get(box_name)
            .and_then(|v| parse_box(v))
            .unwrap_or_default();
        for side in SIDES {
            if let Some(value) = props.get(&format!("{box_name}-{side}")) {
                let slot = match side {
                    "top" => &mut spacing.top,
                    "right" => &mut spacing.right,
                    "bottom" => &mut spacing.bottom,
                    _ => &mut spacing.left,
                };
                *slot = Some(value.trim().to_string());
            }
        }
        if !spacing.is_empty() {
            put(attrs, box_name, spacing);
        }
    }
}

fn map_border(props: &PropertyMap, attrs: &mut Attrs) {
    if let Some(border) = props.get("border").and_then(|v| parse_border(v)) {
        let width = Spacing {
            top: Some(border.width.clone()),
            right: Some(border.width.clone()),
            bottom: Some(border.width.clone()),
            left: Some(border.width),
        };
        put(attrs, "border_width", width);
        put(attrs, "border_style", border.style);
        put(attrs, "border_color", border.color);
    }
    if let Some(width) = props.get("border-width").and_then(|v| parse_box(v)) {
        put(attrs, "border_width", width);
    }
    if let Some(style) = props.get("border-style") {
        put(attrs, "border_style", style.as_str());
    }
    if let Some(color) = props.get("border-color") {
        put(attrs, "border_color", color.as_str());
    }
    if let Some(corners) = props.get("border-radius").and_then(|v| parse_corners(v)) {
        put(attrs, "border_radius", corners);
    }
}

fn map_shadow(props: &PropertyMap, property: &str, prefix: &str, attrs: &mut Attrs) {
    let Some(shadow) = props.get(property).and_then(|v| parse_shadow(v)) else {
        return;
    };
    put(attrs, &format!("{prefix}_style"), "custom");
    put(attrs, &format!("{prefix}_horizontal"), shadow.horizontal);
    put(attrs, &format!("{prefix}_vertical"), shadow.vertical);
    put(attrs, &format!("{prefix}_blur"), shadow.blur);
    if let Some(spread) = shadow.spread {
        put(attrs, &format!("{prefix}_spread"), spread);
    }
    if let Some(color) = shadow.color {
        put(attrs, &format!("{prefix}_color"), color);
    }
}

fn map_typography(props: &PropertyMap, attrs: &mut Attrs) {
    if let Some(family) = props.get("font-family").and_then(|v| first_font_family(v)) {
        put(attrs, "font_family", family);
    }
    for (property, key) in [
        ("font-size", "font_size"),
        ("font-weight", "font_weight"),
        ("font-style", "font_style"),
        ("line-height", "line_height"),
        ("letter-spacing", "letter_spacing"),
        ("color", "text_color"),
        ("text-align", "text_align"),
        ("text-transform", "text_transform"),
    ] {
        if let Some(value) = props.get(property) {
            put(attrs, key, value.as_str());
        }
    }
    if let Some(decoration) = props.get("text-decoration") {
        let lower = decoration.to_ascii_lowercase();
        let normalized = ["underline", "line-through", "none"]
            .into_iter()
            .find(|kind| lower.contains(kind));
        if let Some(kind) = normalized {
            put(attrs, "text_decoration", kind);
        }
    }
    map_shadow(props, "text-shadow", "text_shadow", attrs);
}

fn map_sizing(props: &PropertyMap, attrs: &mut Attrs) {
    for (property, key) in [
        ("width", "width"),
        ("min-width", "min_width"),
        ("max-width", "max_width"),
        ("height", "height"),
        ("min-height", "min_height"),
        ("max-height", "max_height"),
    ] {
        if let Some(value) = props.get(property) {
            put(attrs, key, value.as_str());
        }
    }
    if let Some(max_width) = props.get("max-width") {
        if max_width.trim().to_ascii_lowercase().ends_with("px") {
            if let Some(px) = leading_int(max_width) {
                put(attrs, "inner_width", px);
            }
        }
    }
}

fn map_filters(props: &PropertyMap, attrs: &mut Attrs) {
    if let Some(filter) = props.get("filter") {
        for (name, amount) in parse_filters(filter) {
            put(attrs, &format!("filter_{name}"), amount);
        }
    }
}

fn map_position(props: &PropertyMap, attrs: &mut Attrs) {
    if let Some(position) = props.get("position") {
        let position = position.to_ascii_lowercase();
        if matches!(
            position.as_str(),
            "relative" | "absolute" | "fixed" | "sticky"
        ) {
            put(attrs, "position_type", position);
        }
    }
    if let Some(z) = props.get("z-index").and_then(|v| v.trim().parse::<i64>().ok()) {
        put(attrs, "z_index", z);
    }
    if let Some(top) = props.get("top") {
        put(attrs, "position_vertical_offset", top.as_str());
    }
    if let Some(left) = props.get("left") {
        put(attrs, "position_horizontal_offset", left.as_str());
    }
    if let Some(opacity) = props.get("opacity").and_then(|v| v.trim().parse::<f64>().ok()) {
        if opacity < 1.0 {
            put(attrs, "opacity", opacity);
        }
    }
}

fn map_overflow(props: &PropertyMap, attrs: &mut Attrs) {
    if let Some(overflow) = props.get("overflow") {
        put(attrs, "overflow_x", overflow.as_str());
        put(attrs, "overflow_y", overflow.as_str());
    }
    if let Some(x) = props.get("overflow-x") {
        put(attrs, "overflow_x", x.as_str());
    }
    if let Some(y) = props.get("overflow-y") {
        put(attrs, "overflow_y", y.as_str());
    }
}

fn map_button_aliases(props: &PropertyMap, attrs: &mut Attrs) {
    let background = props.get("background-color").cloned().or_else(|| {
        match props.get("background").and_then(|v| parse_background(v)) {
            Some(Background::Color(color)) => Some(color),
            _ => None,
        }
    });
    if let Some(color) = background {
        put(attrs, "button_bg_color", color);
    }
    if let Some(color) = props.get("color") {
        put(attrs, "button_text_color", color.as_str());
    }
    if let Some(radius) = props.get("border-radius") {
        put(attrs, "button_border_radius", radius.trim());
    }
}
