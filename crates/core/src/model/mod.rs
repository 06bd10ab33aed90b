//! The canonical builder document: `Section > Row > Column > Module`.

pub mod ids;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub use ids::IdGenerator;

/// Attribute map of any node. Sorted, so serialization is stable.
pub type Attrs = BTreeMap<String, AttrValue>;

/// The root of every import result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub version: String,
    pub content: Vec<Section>,
}

impl Document {
    pub const VERSION: &'static str = "1.0";

    pub fn new(content: Vec<Section>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            content,
        }
    }

    /// `{version: "1.0", content: []}`.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Every module in the document, depth-first in document order.
    pub fn modules(&self) -> Vec<&Module> {
        let mut out = Vec::new();
        for section in &self.content {
            for row in &section.children {
                for column in row.columns() {
                    for module in &column.children {
                        module.collect(&mut out);
                    }
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "section")]
pub struct Section {
    pub id: String,
    pub attrs: Attrs,
    pub children: Vec<Row>,
}

impl Section {
    pub fn new(id: String, attrs: Attrs, children: Vec<Row>) -> Self {
        Self {
            id,
            attrs,
            children,
        }
    }
}

/// A row of columns. The `columns` attribute is derived from the columns'
/// widths at construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "row")]
pub struct Row {
    id: String,
    attrs: Attrs,
    children: Vec<Column>,
}

impl Row {
    pub fn new(id: String, children: Vec<Column>, column_gap: i64) -> Self {
        let ratio = LayoutRatio(children.iter().map(|c| c.width).collect());
        let mut attrs = Attrs::new();
        attrs.insert("columns".to_string(), ratio.to_string().into());
        attrs.insert("column_gap".to_string(), column_gap.into());
        attrs.insert("equal_heights".to_string(), true.into());
        Self {
            id,
            attrs,
            children,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn columns(&self) -> &[Column] {
        &self.children
    }

    /// The `columns` attribute, e.g. `"1_3,1_3,1_3"`.
    pub fn ratio(&self) -> &str {
        self.attrs
            .get("columns")
            .and_then(AttrValue::as_str)
            .unwrap_or("")
    }

    /// Add modules in front of the first column's content.
    pub(crate) fn prepend_to_first_column(&mut self, modules: Vec<Module>) {
        if let Some(first) = self.children.first_mut() {
            first.children.splice(0..0, modules);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "column")]
pub struct Column {
    pub id: String,
    pub attrs: Attrs,
    pub children: Vec<Module>,
    #[serde(skip)]
    width: Fraction,
}

impl Column {
    pub fn new(id: String, width: Fraction, children: Vec<Module>) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("width".to_string(), width.to_string().into());
        Self {
            id,
            attrs,
            children,
            width,
        }
    }

    pub fn width(&self) -> Fraction {
        self.width
    }
}

/// A column width such as `1_3`; whole widths print as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub num: u32,
    pub den: u32,
}

impl Fraction {
    pub const FULL: Fraction = Fraction { num: 1, den: 1 };

    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num == self.den {
            write!(f, "1")
        } else {
            write!(f, "{}_{}", self.num, self.den)
        }
    }
}

/// Comma-joined column widths of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRatio(pub Vec<Fraction>);

impl LayoutRatio {
    /// Equal widths for 1 to 6 columns; anything else has no ratio and
    /// collapses to a single column.
    pub fn equal(count: usize) -> Option<Self> {
        match count {
            1..=6 => {
                let den = count as u32;
                Some(Self(vec![Fraction::new(1, den); count]))
            }
            _ => None,
        }
    }
}

impl fmt::Display for LayoutRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Fraction::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// A content node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    #[serde(rename = "type")]
    pub variant: ModuleVariant,
    pub id: String,
    pub attrs: Attrs,
    pub children: Vec<Module>,
}

impl Module {
    pub fn new(variant: ModuleVariant, id: String) -> Self {
        Self {
            variant,
            id,
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attrs.insert(key.to_string(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// A string attribute, if present and a string.
    pub fn text_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(AttrValue::as_str)
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Module>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }
}

/// Every module type of the builder schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleVariant {
    Heading,
    Text,
    Image,
    Button,
    Video,
    Divider,
    Code,
    Blurb,
    Menu,
    SiteLogo,
    Testimonial,
    Accordion,
    AccordionItem,
    Tabs,
    TabsItem,
    Icon,
    Cta,
    Hero,
    Gallery,
    Audio,
    Map,
    NumberCounter,
    CircleCounter,
    Countdown,
    SocialFollow,
    SocialFollowItem,
    PricingTable,
    TeamMember,
    ContactForm,
    Search,
    Login,
    Signup,
    Slider,
    SliderItem,
    PostTitle,
    Blog,
    Portfolio,
    Comments,
}

impl ModuleVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleVariant::Heading => "heading",
            ModuleVariant::Text => "text",
            ModuleVariant::Image => "image",
            ModuleVariant::Button => "button",
            ModuleVariant::Video => "video",
            ModuleVariant::Divider => "divider",
            ModuleVariant::Code => "code",
            ModuleVariant::Blurb => "blurb",
            ModuleVariant::Menu => "menu",
            ModuleVariant::SiteLogo => "site_logo",
            ModuleVariant::Testimonial => "testimonial",
            ModuleVariant::Accordion => "accordion",
            ModuleVariant::AccordionItem => "accordion_item",
            ModuleVariant::Tabs => "tabs",
            ModuleVariant::TabsItem => "tabs_item",
            ModuleVariant::Icon => "icon",
            ModuleVariant::Cta => "cta",
            ModuleVariant::Hero => "hero",
            ModuleVariant::Gallery => "gallery",
            ModuleVariant::Audio => "audio",
            ModuleVariant::Map => "map",
            ModuleVariant::NumberCounter => "number_counter",
            ModuleVariant::CircleCounter => "circle_counter",
            ModuleVariant::Countdown => "countdown",
            ModuleVariant::SocialFollow => "social_follow",
            ModuleVariant::SocialFollowItem => "social_follow_item",
            ModuleVariant::PricingTable => "pricing_table",
            ModuleVariant::TeamMember => "team_member",
            ModuleVariant::ContactForm => "contact_form",
            ModuleVariant::Search => "search",
            ModuleVariant::Login => "login",
            ModuleVariant::Signup => "signup",
            ModuleVariant::Slider => "slider",
            ModuleVariant::SliderItem => "slider_item",
            ModuleVariant::PostTitle => "post_title",
            ModuleVariant::Blog => "blog",
            ModuleVariant::Portfolio => "portfolio",
            ModuleVariant::Comments => "comments",
        }
    }
}

impl fmt::Display for ModuleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Box spacing with units preserved, e.g. `{"top": "20px"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Spacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}

impl Spacing {
    /// Only top and bottom set.
    pub fn vertical(value: &str) -> Self {
        Self {
            top: Some(value.to_string()),
            bottom: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}

/// Per-corner radius with units preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Corners {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: String,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub title: String,
    pub url: String,
}

/// Value of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Spacing(Spacing),
    Corners(Corners),
    Stops(Vec<GradientStop>),
    MenuItems(Vec<MenuItem>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<Spacing> for AttrValue {
    fn from(v: Spacing) -> Self {
        AttrValue::Spacing(v)
    }
}

impl From<Corners> for AttrValue {
    fn from(v: Corners) -> Self {
        AttrValue::Corners(v)
    }
}

impl From<Vec<GradientStop>> for AttrValue {
    fn from(v: Vec<GradientStop>) -> Self {
        AttrValue::Stops(v)
    }
}

impl From<Vec<MenuItem>> for AttrValue {
    fn from(v: Vec<MenuItem>) -> Self {
        AttrValue::MenuItems(v)
    }
}
