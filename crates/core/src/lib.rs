//! Rebuilds arbitrary HTML as a page-builder document: a tree of
//! `Section > Row > Column > Module` nodes with typed attributes.
//!
//! Every entry point is infallible. Whatever cannot be interpreted is
//! dropped or kept as an opaque `code` module, and the reason is available
//! through [`Importer::diagnose`].

pub mod assemble;
pub mod classify;
pub mod config;
pub mod context;
pub mod css;
pub mod dom;
pub mod error;
pub mod layout;
pub mod model;
pub mod page;
pub mod patterns;
pub mod style_map;

pub use config::ImportConfig;
pub use error::{ConfigError, DemoteReason, Diagnostic, DropReason};
pub use model::{AttrValue, Column, Document, Module, ModuleVariant, Row, Section};
pub use page::{FullPage, ThemeColors, ThemeFonts};

use assemble::{build_document, is_structured, merge_text_modules, opaque_document};
use classify::{classify_children, code};
use context::ParseContext;
use dom::sanitize::{load, LoadedMarkup};
use page::build_full_page;

/// Runs imports with one configuration. Holds no per-call state, so one
/// importer can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Full reconstruction. A featured image becomes the leading module.
    pub fn parse_to_document(&self, markup: &str, featured_image: Option<&str>) -> Document {
        let mut ctx = ParseContext::new(&self.config, markup);
        let document = self.document_in(&mut ctx, markup, featured_image);
        tracing::info!(
            sections = document.content.len(),
            modules = document.modules().len(),
            "parsed document"
        );
        document
    }

    /// Classified, text-merged modules without structure.
    pub fn parse_to_module_list(&self, markup: &str) -> Vec<Module> {
        let mut ctx = ParseContext::new(&self.config, markup);
        let modules = Self::modules_in(&mut ctx, markup);
        tracing::info!(modules = modules.len(), "parsed module list");
        modules
    }

    /// The whole sanitized input as one `code` module.
    pub fn parse_as_opaque_code(&self, markup: &str) -> Document {
        let mut ctx = ParseContext::new(&self.config, markup);
        let document = match load(markup) {
            LoadedMarkup::Empty => Document::empty(),
            LoadedMarkup::Tree { markup: sanitized, .. } => opaque_document(&mut ctx, &sanitized),
        };
        tracing::info!(sections = document.content.len(), "parsed as opaque code");
        document
    }

    /// Header, footer, body sections and theme data of a whole page.
    pub fn parse_full_page(&self, markup: &str) -> FullPage {
        let mut ctx = ParseContext::new(&self.config, markup);
        let page = match load(markup) {
            LoadedMarkup::Empty => FullPage::blank(&ctx.sheet, markup),
            LoadedMarkup::Tree { root, .. } => build_full_page(&mut ctx, &root, markup),
        };
        tracing::info!(
            sections = page.sections.len(),
            header = page.header.is_some(),
            footer = page.footer.is_some(),
            "parsed full page"
        );
        page
    }

    /// Everything a full reconstruction of `markup` dropped, demoted or
    /// skipped, in the order it happened.
    pub fn diagnose(&self, markup: &str) -> Vec<Diagnostic> {
        let mut ctx = ParseContext::new(&self.config, markup);
        let _ = self.document_in(&mut ctx, markup, None);
        ctx.into_diagnostics()
    }

    fn document_in(
        &self,
        ctx: &mut ParseContext<'_>,
        markup: &str,
        featured_image: Option<&str>,
    ) -> Document {
        match load(markup) {
            LoadedMarkup::Empty => Document::empty(),
            LoadedMarkup::Tree { markup: sanitized, .. } if is_structured(ctx, &sanitized) => {
                ctx.note(Diagnostic::demoted("body", DemoteReason::AlreadyStructured));
                opaque_document(ctx, &sanitized)
            }
            LoadedMarkup::Tree { root, .. } => build_document(ctx, &root, featured_image),
        }
    }

    fn modules_in(ctx: &mut ParseContext<'_>, markup: &str) -> Vec<Module> {
        match load(markup) {
            LoadedMarkup::Empty => Vec::new(),
            LoadedMarkup::Tree { markup: sanitized, .. } if is_structured(ctx, &sanitized) => {
                ctx.note(Diagnostic::demoted("body", DemoteReason::AlreadyStructured));
                vec![code(ctx, sanitized)]
            }
            LoadedMarkup::Tree { root, .. } => {
                let modules = classify_children(ctx, &root);
                merge_text_modules(ctx, modules)
            }
        }
    }
}

/// [`Importer::parse_to_document`] with the default configuration.
pub fn parse_to_document(markup: &str, featured_image: Option<&str>) -> Document {
    Importer::default().parse_to_document(markup, featured_image)
}

/// [`Importer::parse_to_module_list`] with the default configuration.
pub fn parse_to_module_list(markup: &str) -> Vec<Module> {
    Importer::default().parse_to_module_list(markup)
}

/// [`Importer::parse_as_opaque_code`] with the default configuration.
pub fn parse_as_opaque_code(markup: &str) -> Document {
    Importer::default().parse_as_opaque_code(markup)
}

/// [`Importer::parse_full_page`] with the default configuration.
pub fn parse_full_page(markup: &str) -> FullPage {
    Importer::default().parse_full_page(markup)
}
