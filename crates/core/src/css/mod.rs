pub mod properties;
pub mod selector;
pub mod values;

use std::collections::HashMap;

use crate::dom::DomNode;
use crate::error::Diagnostic;
use crate::patterns::STYLE_BLOCK_RE;
use properties::{parse_declarations, resolve_vars};
use selector::{parse_stylesheet, CssRule, SelectorQuery};

/// Flat `property -> value` map after cascading.
pub type PropertyMap = HashMap<String, String>;

const BOX_SHORTHANDS: [&str; 2] = ["padding", "margin"];
const BOX_SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Insert a declaration the way a later one in the cascade applies: a box
/// shorthand resets any per-side longhands already in the map.
pub fn cascade_insert(map: &mut PropertyMap, property: String, value: String) {
    if BOX_SHORTHANDS.contains(&property.as_str()) {
        for side in BOX_SIDES {
            map.remove(&format!("{property}-{side}"));
        }
    }
    map.insert(property, value);
}

/// Rules from every `<style>` block of a document, plus `:root` variables.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<CssRule>,
    variables: HashMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl StyleSheet {
    /// Collect and parse the `<style>` blocks of raw (unsanitized) markup.
    pub fn extract(markup: &str) -> Self {
        let css: Vec<&str> = STYLE_BLOCK_RE
            .captures_iter(markup)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        Self::parse(&css.join("\n"))
    }

    /// Parse stylesheet text.
    pub fn parse(css: &str) -> Self {
        let parsed = parse_stylesheet(css);
        let mut sheet = StyleSheet::default();

        for selector in parsed.skipped {
            sheet.diagnostics.push(Diagnostic::SkippedRule { selector });
        }

        let mut rules = Vec::new();
        for rule in parsed.rules {
            if rule.selector.is_root() {
                let (declarations, malformed) = parse_declarations(&rule.declarations);
                for declaration in declarations {
                    if let Some(name) = declaration.property.strip_prefix("--") {
                        sheet.variables.insert(name.to_string(), declaration.value);
                    }
                }
                sheet.note_malformed(malformed);
                continue;
            }
            // Interaction states must not leak into base styling
            if rule.selector.has_pseudo() {
                sheet.diagnostics.push(Diagnostic::SkippedRule {
                    selector: rule.selector.text.clone(),
                });
                continue;
            }
            rules.push(rule);
        }

        // Specificity, then source order: the last applied wins
        rules.sort_by_key(|r| (r.specificity, r.order));
        sheet.rules = rules;

        tracing::debug!(
            rules = sheet.rules.len(),
            variables = sheet.variables.len(),
            "parsed stylesheet"
        );
        sheet
    }

    fn note_malformed(&mut self, malformed: Vec<String>) {
        self.diagnostics.extend(
            malformed
                .into_iter()
                .map(|declaration| Diagnostic::SkippedDeclaration { declaration }),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.variables.is_empty()
    }

    /// Number of applicable (non-`:root`, non-pseudo) rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// `:root` custom properties, keyed without `--`, values unresolved.
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    /// Notes about rules and declarations that were skipped while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolve `var()` references against this sheet's variables.
    pub fn resolve(&self, value: &str) -> String {
        resolve_vars(value, &self.variables)
    }

    /// Merged properties of all rules applying to an element described by a
    /// simple or compound selector (`h1`, `.hero`, `a.btn`).
    pub fn rules_for(&self, selector: &str) -> PropertyMap {
        match SelectorQuery::parse(selector) {
            Some(query) => self.rules_for_query(&query),
            None => PropertyMap::new(),
        }
    }

    /// Merged properties of all rules applying to `node`.
    pub fn rules_for_element(&self, node: &DomNode) -> PropertyMap {
        if self.rules.is_empty() || !node.is_element() {
            return PropertyMap::new();
        }
        self.rules_for_query(&SelectorQuery::for_element(node))
    }

    fn rules_for_query(&self, query: &SelectorQuery) -> PropertyMap {
        let mut merged = PropertyMap::new();
        for rule in self.rules.iter().filter(|r| r.selector.applies_to(query)) {
            let (declarations, _) = parse_declarations(&rule.declarations);
            for declaration in declarations {
                if declaration.property.starts_with("--") {
                    continue;
                }
                let value = self.resolve(&declaration.value);
                if !value.is_empty() {
                    cascade_insert(&mut merged, declaration.property, value);
                }
            }
        }
        merged
    }

    /// The element's own `style` attribute, with variables resolved.
    pub fn inline_style(&self, node: &DomNode) -> PropertyMap {
        let mut map = PropertyMap::new();
        self.layer_inline(&mut map, node);
        map
    }

    /// Stylesheet rules for the element with its `style` attribute applied
    /// on top, in declaration order.
    pub fn computed_style(&self, node: &DomNode) -> PropertyMap {
        let mut map = self.rules_for_element(node);
        self.layer_inline(&mut map, node);
        map
    }

    fn layer_inline(&self, map: &mut PropertyMap, node: &DomNode) {
        let Some(style) = node.get_attr("style") else {
            return;
        };
        let (declarations, _) = parse_declarations(style);
        for declaration in declarations {
            let value = self.resolve(&declaration.value);
            if !value.is_empty() {
                cascade_insert(map, declaration.property, value);
            }
        }
    }
}

/// Parse a `style="a:b;c:d"` attribute into a property map.
pub fn parse_inline_style(style: &str) -> PropertyMap {
    let (declarations, _) = parse_declarations(style);
    let mut map = PropertyMap::new();
    for declaration in declarations {
        cascade_insert(&mut map, declaration.property, declaration.value);
    }
    map
}
