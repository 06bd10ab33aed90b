//! Interpretation of shorthand CSS values: backgrounds, gradients, box
//! spacing, corners, borders, shadows and filters.

use crate::model::{Corners, GradientStop, Spacing};
use crate::patterns::{
    BORDER_RE, COLOR_STOP_RE, COLOR_TOKEN_RE, CSS_URL_RE, FILTER_FN_RE, GRADIENT_ANGLE_RE,
    GRADIENT_SIDE_RE, SHADOW_RE,
};

const GRADIENT_FUNCTIONS: &[(&str, &str)] = &[
    ("linear-gradient", "linear"),
    ("radial-gradient", "radial"),
    ("conic-gradient", "conic"),
];

/// Direction used when a gradient does not state one (CSS default: to bottom).
pub const DEFAULT_GRADIENT_DIRECTION: i64 = 180;

#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Gradient(Gradient),
    Image(String),
    Color(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// `linear`, `radial` or `conic`.
    pub kind: &'static str,
    pub direction: i64,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: String,
    pub style: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub horizontal: i64,
    pub vertical: i64,
    pub blur: i64,
    pub spread: Option<i64>,
    pub color: Option<String>,
}

/// Interpret a `background` shorthand: gradient first, then image, then a
/// bare color token.
pub fn parse_background(value: &str) -> Option<Background> {
    let value = value.trim();
    if let Some(gradient) = parse_gradient(value) {
        return Some(Background::Gradient(gradient));
    }
    if let Some(caps) = CSS_URL_RE.captures(value) {
        return Some(Background::Image(caps[1].trim().to_string()));
    }
    // `#fff no-repeat` still names a color first
    let token = value.split_whitespace().next()?;
    if is_color_token(token) {
        return Some(Background::Color(token.to_string()));
    }
    None
}

/// Whether a single token reads as a color.
pub fn is_color_token(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    COLOR_TOKEN_RE.is_match(&lower)
        && !matches!(
            lower.as_str(),
            "none" | "inherit" | "initial" | "unset" | "auto" | "no-repeat" | "repeat" | "cover"
                | "contain" | "center" | "fixed" | "scroll"
        )
}

/// Parse the first linear/radial/conic gradient in a value.
pub fn parse_gradient(value: &str) -> Option<Gradient> {
    let lower = value.to_ascii_lowercase();
    let (kind, args) = GRADIENT_FUNCTIONS.iter().find_map(|(func, kind)| {
        let start = lower.find(func)?;
        let args = function_args(&value[start + func.len()..])?;
        Some((*kind, args))
    })?;

    let direction = if let Some(caps) = GRADIENT_ANGLE_RE.captures(args) {
        caps[1].parse::<f64>().map(|deg| deg as i64).unwrap_or(DEFAULT_GRADIENT_DIRECTION)
    } else if let Some(caps) = GRADIENT_SIDE_RE.captures(args) {
        match caps[1].to_ascii_lowercase().as_str() {
            "top" => 0,
            "right" => 90,
            "bottom" => 180,
            "left" => 270,
            _ => DEFAULT_GRADIENT_DIRECTION,
        }
    } else {
        DEFAULT_GRADIENT_DIRECTION
    };

    let found: Vec<(String, Option<u32>)> = COLOR_STOP_RE
        .captures_iter(args)
        .map(|caps| {
            let color = caps[1].to_string();
            let position = caps
                .get(2)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .map(|p| p.round() as u32);
            (color, position)
        })
        .collect();

    let count = found.len();
    let stops = found
        .into_iter()
        .enumerate()
        .map(|(i, (color, position))| GradientStop {
            color,
            position: position.unwrap_or_else(|| even_position(i, count)),
        })
        .collect();

    Some(Gradient {
        kind,
        direction,
        stops,
    })
}

fn even_position(index: usize, count: usize) -> u32 {
    let span = count.saturating_sub(1).max(1) as f64;
    (index as f64 / span * 100.0).round() as u32
}

/// The text between a function's opening parenthesis and its matching close.
/// `rest` starts right after the function name.
fn function_args(rest: &str) -> Option<&str> {
    let rest = rest.trim_start();
    let inner = rest.strip_prefix('(')?;
    let mut depth = 1;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&inner[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on whitespace outside parentheses.
fn tokens(value: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start: Option<usize> = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                if let Some(s) = start.take() {
                    out.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(&value[s..]);
    }
    out
}

/// CSS 1-4 value box expansion: top, right, bottom, left.
fn expand_box(value: &str) -> Option<[String; 4]> {
    let t = tokens(value.trim());
    let [top, right, bottom, left] = match t.as_slice() {
        [a] => [a, a, a, a],
        [a, b] => [a, b, a, b],
        [a, b, c] => [a, b, c, b],
        [a, b, c, d, ..] => [a, b, c, d],
        [] => return None,
    };
    Some([top, right, bottom, left].map(|s| s.to_string()))
}

/// `padding`/`margin`/`border-width` shorthand into a spacing object.
pub fn parse_box(value: &str) -> Option<Spacing> {
    let [top, right, bottom, left] = expand_box(value)?;
    Some(Spacing {
        top: Some(top),
        right: Some(right),
        bottom: Some(bottom),
        left: Some(left),
    })
}

/// `border-radius` into corners (top-left, top-right, bottom-right,
/// bottom-left). Elliptical radii keep only the horizontal part.
pub fn parse_corners(value: &str) -> Option<Corners> {
    let horizontal = value.split('/').next().unwrap_or(value);
    let [top_left, top_right, bottom_right, bottom_left] = expand_box(horizontal)?;
    Some(Corners {
        top_left: Some(top_left),
        top_right: Some(top_right),
        bottom_right: Some(bottom_right),
        bottom_left: Some(bottom_left),
    })
}

/// `border: 1px solid #ddd`.
pub fn parse_border(value: &str) -> Option<Border> {
    let caps = BORDER_RE.captures(value)?;
    Some(Border {
        width: caps[1].to_string(),
        style: caps[2].to_ascii_lowercase(),
        color: caps[3].to_string(),
    })
}

/// `box-shadow` / `text-shadow`: the first shadow of the list.
pub fn parse_shadow(value: &str) -> Option<Shadow> {
    if value.trim().eq_ignore_ascii_case("none") {
        return None;
    }
    let caps = SHADOW_RE.captures(value)?;
    let int = |i: usize| -> Option<i64> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(|v| v as i64)
    };
    Some(Shadow {
        horizontal: int(1)?,
        vertical: int(2)?,
        blur: int(3)?,
        spread: int(4),
        color: caps.get(5).map(|m| m.as_str().to_string()),
    })
}

/// `filter` functions as `(attr suffix, integer)`, e.g. `("brightness", 120)`.
/// Ratios become percentages; blur stays in px and hue-rotate in degrees.
pub fn parse_filters(value: &str) -> Vec<(String, i64)> {
    FILTER_FN_RE
        .captures_iter(value)
        .filter_map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let amount = caps[2].parse::<f64>().ok()?;
            let unit = caps.get(3).map(|m| m.as_str());
            let scaled = match (name.as_str(), unit) {
                ("blur", _) | ("hue-rotate", _) => amount,
                (_, Some("%")) => amount,
                _ => amount * 100.0,
            };
            Some((name.replace('-', "_"), scaled.round() as i64))
        })
        .collect()
}

/// Leading integer of a length such as `1200px` or `80`.
pub fn leading_int(value: &str) -> Option<i64> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    digits.parse::<f64>().ok().map(|v| v as i64)
}

/// First family of a `font-family` list, unquoted.
pub fn first_font_family(value: &str) -> Option<String> {
    let family = value
        .split(',')
        .next()?
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    if family.is_empty() {
        None
    } else {
        Some(family.to_string())
    }
}
