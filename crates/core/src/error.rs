//! Error and diagnostic types.
//!
//! Parsing itself never fails: whatever the engine could not interpret is
//! dropped or demoted, and the reason is recorded as a [`Diagnostic`] on the
//! per-call context. Configuration loading is the only fallible surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an [`ImportConfig`](crate::config::ImportConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Why an element produced no module at all.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    #[error("whitespace-only text")]
    WhitespaceText,
    #[error("paragraph without text")]
    EmptyParagraph,
    #[error("image without src")]
    MissingImageSource,
    #[error("caption belongs to its figure")]
    Caption,
    #[error("line break")]
    LineBreak,
    #[error("container without content")]
    EmptyContainer,
    #[error("element without text")]
    EmptyElement,
}

/// Why an element was kept only as opaque markup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoteReason {
    #[error("iframe without a recognizable video host")]
    UnrecognizedVideoHost,
    #[error("structure too complex to model")]
    ComplexStructure,
    #[error("no dedicated module for this tag")]
    UnknownTag,
    #[error("markup already carries builder structure")]
    AlreadyStructured,
}

/// One note from a parse call explaining a lossy decision.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("dropped <{tag}>: {reason}")]
    Dropped { tag: String, reason: DropReason },

    #[error("demoted <{tag}> to code: {reason}")]
    Demoted { tag: String, reason: DemoteReason },

    #[error("skipped css rule `{selector}`")]
    SkippedRule { selector: String },

    #[error("skipped css declaration `{declaration}`")]
    SkippedDeclaration { declaration: String },
}

impl Diagnostic {
    pub fn dropped(tag: &str, reason: DropReason) -> Self {
        Diagnostic::Dropped {
            tag: tag.to_string(),
            reason,
        }
    }

    pub fn demoted(tag: &str, reason: DemoteReason) -> Self {
        Diagnostic::Demoted {
            tag: tag.to_string(),
            reason,
        }
    }

    /// The tag this note is about, when it concerns an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Diagnostic::Dropped { tag, .. } | Diagnostic::Demoted { tag, .. } => Some(tag),
            _ => None,
        }
    }
}
