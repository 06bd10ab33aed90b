//! Heuristic column detection.
//!
//! A [`ColumnDetector`] tries a prioritized list of [`ColumnStrategy`]
//! objects against a container until one finds a plausible column group.

use crate::config::ImportConfig;
use crate::dom::DomNode;
use crate::patterns::{DISPLAY_FLEX_GRID_RE, FLEX_CLASS_RE};

/// Class substrings that mark an element as one column of a group.
const COLUMN_CLASS_PATTERNS: &[&str] = &[
    "col", "column", "grid", "cell",
    "card", "item", "box", "block", "panel",
    "feature", "service", "benefit", "advantage",
    "team", "member", "staff", "person",
    "pricing", "plan", "package", "tier",
    "testimonial", "review", "quote",
    "stat", "counter", "metric", "number",
    "step", "process", "timeline",
    "logo", "partner", "client", "brand",
    "hero-content", "hero-image", "hero-text",
    "content", "media", "image", "text", "info",
    "left", "right", "primary", "secondary",
];

/// Class substrings of wrappers that may hold the real column group.
const WRAPPER_CLASS_PATTERNS: &[&str] = &["row", "flex", "grid", "container", "wrapper", "inner"];

/// A detected column group.
#[derive(Debug, Clone)]
pub struct ColumnLayout<'a> {
    /// The node whose children are the columns: the container itself or a
    /// wrapper below it.
    pub host: &'a DomNode,
    pub columns: Vec<&'a DomNode>,
    pub strategy: &'static str,
}

impl ColumnLayout<'_> {
    pub fn count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the columns sit directly under `node`.
    pub fn is_hosted_by(&self, node: &DomNode) -> bool {
        std::ptr::eq(self.host, node)
    }
}

/// Bounds a strategy must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLimits {
    pub min: usize,
    pub max: usize,
    pub max_depth: usize,
}

impl Default for ColumnLimits {
    fn default() -> Self {
        Self::from(&ImportConfig::default())
    }
}

impl From<&ImportConfig> for ColumnLimits {
    fn from(config: &ImportConfig) -> Self {
        Self {
            min: config.min_columns,
            max: config.max_columns,
            max_depth: config.max_wrapper_depth,
        }
    }
}

impl ColumnLimits {
    fn accepts(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// One way of recognizing a column group.
pub trait ColumnStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn detect<'a>(&self, node: &'a DomNode, limits: &ColumnLimits) -> Option<ColumnLayout<'a>>;
}

/// Direct children whose class looks like a column, or whose inline style
/// mentions `flex` or `width`.
pub struct ClassHintedChildren;

impl ClassHintedChildren {
    fn is_candidate(child: &DomNode) -> bool {
        let class = child.class_attr();
        let style = child.attr_or_empty("style").to_ascii_lowercase();
        COLUMN_CLASS_PATTERNS.iter().any(|p| class.contains(p))
            || style.contains("flex")
            || style.contains("width")
    }
}

impl ColumnStrategy for ClassHintedChildren {
    fn name(&self) -> &'static str {
        "class-hinted"
    }

    fn detect<'a>(&self, node: &'a DomNode, limits: &ColumnLimits) -> Option<ColumnLayout<'a>> {
        let columns: Vec<&DomNode> = node
            .element_children()
            .filter(|c| Self::is_candidate(c))
            .collect();
        limits.accepts(columns.len()).then(|| ColumnLayout {
            host: node,
            columns,
            strategy: self.name(),
        })
    }
}

/// Descends into wrapper `div`s and retries class hints there.
pub struct WrapperDescent;

impl WrapperDescent {
    fn is_wrapper(child: &DomNode) -> bool {
        if child.tag != "div" {
            return false;
        }
        let class = child.class_attr();
        let style = child.attr_or_empty("style").to_ascii_lowercase();
        WRAPPER_CLASS_PATTERNS.iter().any(|p| class.contains(p))
            || style.contains("flex")
            || style.contains("grid")
    }

    fn descend<'a>(
        &self,
        node: &'a DomNode,
        limits: &ColumnLimits,
        depth: usize,
    ) -> Option<ColumnLayout<'a>> {
        if depth >= limits.max_depth {
            return None;
        }
        for wrapper in node.element_children().filter(|c| Self::is_wrapper(c)) {
            if let Some(found) = ClassHintedChildren.detect(wrapper, limits) {
                return Some(ColumnLayout {
                    strategy: self.name(),
                    ..found
                });
            }
            if let Some(found) = self.descend(wrapper, limits, depth + 1) {
                return Some(found);
            }
        }
        None
    }
}

impl ColumnStrategy for WrapperDescent {
    fn name(&self) -> &'static str {
        "wrapper-descent"
    }

    fn detect<'a>(&self, node: &'a DomNode, limits: &ColumnLimits) -> Option<ColumnLayout<'a>> {
        self.descend(node, limits, 0)
    }
}

/// Plain `div` children, at least two of them with content.
pub struct DirectDivs;

impl ColumnStrategy for DirectDivs {
    fn name(&self) -> &'static str {
        "direct-divs"
    }

    fn detect<'a>(&self, node: &'a DomNode, limits: &ColumnLimits) -> Option<ColumnLayout<'a>> {
        let divs: Vec<&DomNode> = node.element_children().filter(|c| c.tag == "div").collect();
        if !limits.accepts(divs.len()) {
            return None;
        }
        let with_content = divs.iter().filter(|d| d.has_content()).count();
        (with_content >= 2).then(|| ColumnLayout {
            host: node,
            columns: divs,
            strategy: self.name(),
        })
    }
}

/// The container itself is flex/grid: every element child is a column.
pub struct FlexContainer;

impl FlexContainer {
    pub fn is_flex_container(node: &DomNode) -> bool {
        DISPLAY_FLEX_GRID_RE.is_match(node.attr_or_empty("style"))
            || FLEX_CLASS_RE.is_match(node.attr_or_empty("class"))
    }
}

impl ColumnStrategy for FlexContainer {
    fn name(&self) -> &'static str {
        "flex-container"
    }

    fn detect<'a>(&self, node: &'a DomNode, limits: &ColumnLimits) -> Option<ColumnLayout<'a>> {
        if !Self::is_flex_container(node) {
            return None;
        }
        let columns: Vec<&DomNode> = node.element_children().collect();
        limits.accepts(columns.len()).then(|| ColumnLayout {
            host: node,
            columns,
            strategy: self.name(),
        })
    }
}

/// Runs the strategies in priority order.
pub struct ColumnDetector {
    strategies: Vec<Box<dyn ColumnStrategy>>,
    limits: ColumnLimits,
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self::new(ColumnLimits::default())
    }
}

impl ColumnDetector {
    /// The standard strategy order: class hints, wrapper descent, plain
    /// divs, flex/grid container.
    pub fn new(limits: ColumnLimits) -> Self {
        Self::with_strategies(
            limits,
            vec![
                Box::new(ClassHintedChildren),
                Box::new(WrapperDescent),
                Box::new(DirectDivs),
                Box::new(FlexContainer),
            ],
        )
    }

    pub fn with_strategies(limits: ColumnLimits, strategies: Vec<Box<dyn ColumnStrategy>>) -> Self {
        Self { strategies, limits }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(ColumnLimits::from(config))
    }

    pub fn limits(&self) -> ColumnLimits {
        self.limits
    }

    pub fn detect<'a>(&self, node: &'a DomNode) -> Option<ColumnLayout<'a>> {
        if !node.is_element() {
            return None;
        }
        for strategy in &self.strategies {
            tracing::trace!(strategy = strategy.name(), tag = %node.tag, "trying column strategy");
            if let Some(layout) = strategy.detect(node, &self.limits) {
                tracing::debug!(
                    strategy = layout.strategy,
                    columns = layout.count(),
                    host = %layout.host.tag,
                    "detected column layout"
                );
                return Some(layout);
            }
        }
        None
    }
}
