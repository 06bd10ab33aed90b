pub mod sanitize;

use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::fmt;

/// Tags whose own markup never reaches the tree.
const STRIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Tags the classifier treats as plain containers.
pub const CONTAINER_TAGS: &[&str] = &[
    "div", "section", "article", "main", "aside", "header", "footer", "figure",
];

/// A node in our DOM tree. Minimal: only what classification needs, plus the
/// parser handle so markup can be written back out.
#[derive(Clone)]
pub struct DomNode {
    pub tag: String,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<DomNode>,
    pub node_type: NodeType,
    source: Option<Source>,
}

/// Parser node plus the document that owns it. rcdom empties every
/// descendant when the document is dropped, so each node keeps it alive.
#[derive(Clone)]
struct Source {
    node: Handle,
    _document: Handle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Element,
    Text,
    Document,
}

impl fmt::Debug for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomNode")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("text", &self.text)
            .field("node_type", &self.node_type)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl DomNode {
    pub fn new_element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Element,
            source: None,
        }
    }

    pub fn new_text(text: &str) -> Self {
        Self {
            tag: String::new(),
            attributes: Vec::new(),
            text: text.to_string(),
            children: Vec::new(),
            node_type: NodeType::Text,
            source: None,
        }
    }

    pub fn new_document() -> Self {
        Self {
            tag: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Document,
            source: None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, trimmed, or `""` when absent.
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.get_attr(name).map(str::trim).unwrap_or("")
    }

    /// The raw `class` attribute, lower-cased.
    pub fn class_attr(&self) -> String {
        self.attr_or_empty("class").to_lowercase()
    }

    /// Individual class names in source order.
    pub fn classes(&self) -> Vec<String> {
        self.attr_or_empty("class")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn id_attr(&self) -> Option<&str> {
        self.get_attr("id").map(str::trim).filter(|id| !id.is_empty())
    }

    /// Element children only, skipping text.
    pub fn element_children(&self) -> impl Iterator<Item = &DomNode> {
        self.children.iter().filter(|c| c.is_element())
    }

    /// Get the visible text content of this node and all children, with
    /// whitespace runs collapsed.
    pub fn text_content(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => out.push_str(&self.text),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether the node holds anything: an element child or non-blank text.
    pub fn has_content(&self) -> bool {
        self.children
            .iter()
            .any(|c| c.is_element() || !c.text.trim().is_empty())
    }

    /// The only meaningful child when it is a plain container: no other
    /// element siblings and no loose text around it.
    pub fn sole_container_child(&self) -> Option<&DomNode> {
        let mut found = None;
        for child in &self.children {
            match child.node_type {
                NodeType::Text if child.text.trim().is_empty() => continue,
                NodeType::Element if found.is_none() => found = Some(child),
                _ => return None,
            }
        }
        found.filter(|c| CONTAINER_TAGS.contains(&c.tag.as_str()))
    }

    /// Whether `other` is this node or one of its descendants.
    pub fn contains(&self, other: &DomNode) -> bool {
        std::ptr::eq(self, other) || self.children.iter().any(|c| c.contains(other))
    }

    /// First descendant (depth-first, document order) matching `pred`,
    /// excluding this node.
    pub fn find_first<F>(&self, pred: F) -> Option<&DomNode>
    where
        F: Fn(&DomNode) -> bool + Copy,
    {
        for child in &self.children {
            if child.is_element() && pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_first(pred) {
                return Some(found);
            }
        }
        None
    }

    /// All descendant elements matching `pred`, in document order.
    pub fn find_all<F>(&self, pred: F) -> Vec<&DomNode>
    where
        F: Fn(&DomNode) -> bool + Copy,
    {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    fn collect_matching<'a, F>(&'a self, pred: F, out: &mut Vec<&'a DomNode>)
    where
        F: Fn(&DomNode) -> bool + Copy,
    {
        for child in &self.children {
            if child.is_element() && pred(child) {
                out.push(child);
            }
            child.collect_matching(pred, out);
        }
    }

    /// Markup of this node including its own tag.
    pub fn outer_html(&self) -> String {
        match &self.source {
            Some(source) => serialize_handle(&source.node, TraversalScope::IncludeNode),
            None => match self.node_type {
                NodeType::Text => escape_html(&self.text),
                _ => self.inner_html(),
            },
        }
    }

    /// Markup of this node's children.
    pub fn inner_html(&self) -> String {
        match (&self.source, &self.node_type) {
            (Some(source), NodeType::Element) => {
                serialize_handle(&source.node, TraversalScope::ChildrenOnly(None))
            }
            _ => self.children.iter().map(DomNode::outer_html).collect(),
        }
    }
}

fn serialize_handle(handle: &Handle, traversal_scope: TraversalScope) -> String {
    let mut bytes = Vec::new();
    let serializable: SerializableHandle = handle.clone().into();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };

    if serialize(&mut bytes, &serializable, opts).is_err() {
        return String::new();
    }
    String::from_utf8(bytes).unwrap_or_default()
}

/// Escape text for embedding in markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Parse an HTML string and return its `<body>` as a DomNode tree.
///
/// html5ever recovers from any malformed input, so this never fails; a
/// document without a body yields an empty wrapper.
pub fn parse_html(html: &str) -> DomNode {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(html.as_bytes());

    let errors = dom.errors.borrow().len();
    if errors > 0 {
        tracing::debug!(errors, "recovered from html parse errors");
    }

    match find_body(&dom.document) {
        Some(body) => {
            convert_node(&body, &dom.document).unwrap_or_else(|| DomNode::new_element("body"))
        }
        None => DomNode::new_element("body"),
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(found) = find_body(child) {
            return Some(found);
        }
    }
    None
}

fn convert_node(handle: &Handle, document: &Handle) -> Option<DomNode> {
    match &handle.data {
        NodeData::Document => {
            let mut doc = DomNode::new_document();
            for child in handle.children.borrow().iter() {
                doc.children.extend(convert_node(child, document));
            }
            Some(doc)
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_lowercase();

            // Executable and presentational blocks never become content
            if STRIPPED_TAGS.contains(&tag.as_str()) {
                return None;
            }

            let mut node = DomNode::new_element(&tag);
            for attr in attrs.borrow().iter() {
                node.attributes
                    .push((attr.name.local.to_string().to_lowercase(), attr.value.to_string()));
            }
            for child in handle.children.borrow().iter() {
                node.children.extend(convert_node(child, document));
            }
            node.source = Some(Source {
                node: handle.clone(),
                _document: document.clone(),
            });
            Some(node)
        }
        NodeData::Text { contents } => {
            let mut node = DomNode::new_text(&contents.borrow());
            node.source = Some(Source {
                node: handle.clone(),
                _document: document.clone(),
            });
            Some(node)
        }
        _ => None, // Comments, PIs, doctypes → ignored
    }
}
