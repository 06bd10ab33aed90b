//! Per-call state of one import.

use crate::config::ImportConfig;
use crate::css::StyleSheet;
use crate::dom::DomNode;
use crate::error::Diagnostic;
use crate::layout::{ColumnDetector, ColumnLayout};
use crate::model::{Attrs, IdGenerator, Module, ModuleVariant};
use crate::style_map::{element_styles, StyleTarget};

/// Everything one top-level call needs: ids, styles, the column detector
/// and the diagnostics collected along the way. Dropped when the call ends.
pub struct ParseContext<'c> {
    pub config: &'c ImportConfig,
    pub sheet: StyleSheet,
    pub detector: ColumnDetector,
    ids: IdGenerator,
    diagnostics: Vec<Diagnostic>,
}

impl<'c> ParseContext<'c> {
    /// Start a call over `raw_markup`; its `<style>` blocks become the sheet.
    pub fn new(config: &'c ImportConfig, raw_markup: &str) -> Self {
        let sheet = StyleSheet::extract(raw_markup);
        let diagnostics = sheet.diagnostics().to_vec();
        for diagnostic in &diagnostics {
            tracing::debug!(%diagnostic, "stylesheet");
        }
        Self {
            config,
            sheet,
            detector: ColumnDetector::from_config(config),
            ids: IdGenerator::new(&config.id_source_tag, config.seed),
            diagnostics,
        }
    }

    pub fn next_id(&mut self, kind: &str) -> String {
        self.ids.next(kind)
    }

    /// A new, attribute-less module with a fresh id.
    pub fn module(&mut self, variant: ModuleVariant) -> Module {
        let id = self.next_id(variant.as_str());
        Module::new(variant, id)
    }

    pub fn note(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "import");
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Stylesheet rules then inline style of `node`, mapped for `target`.
    pub fn styles(&self, node: &DomNode, target: StyleTarget) -> Attrs {
        element_styles(&self.sheet, node, target)
    }

    pub fn detect_columns<'a>(&self, node: &'a DomNode) -> Option<ColumnLayout<'a>> {
        self.detector.detect(node)
    }
}
