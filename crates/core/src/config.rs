//! Import configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for one [`Importer`](crate::Importer).
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Middle segment of every generated id (`heading_<tag>_3_a1b2c3d4`).
    pub id_source_tag: String,
    /// Seed for id suffixes. `None` draws fresh random suffixes per call.
    pub seed: Option<u64>,
    /// Fewest candidates a column strategy must find.
    pub min_columns: usize,
    /// Most candidates a column strategy may find.
    pub max_columns: usize,
    /// How many wrapper levels column detection descends through.
    pub max_wrapper_depth: usize,
    /// Substrings marking markup that was generated by the builder itself.
    pub structured_markers: Vec<String>,
    /// `inner_width` attribute of generated sections.
    pub section_inner_width: i64,
    /// `column_gap` attribute of generated rows.
    pub column_gap: i64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            id_source_tag: "import".to_string(),
            seed: None,
            min_columns: 2,
            max_columns: 8,
            max_wrapper_depth: 4,
            structured_markers: vec!["tb-section".to_string(), "jtb-section".to_string()],
            section_inner_width: 1200,
            column_gap: 30,
        }
    }
}

impl ImportConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ImportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_columns < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_columns must be at least 2, got {}",
                self.min_columns
            )));
        }
        if self.max_columns < self.min_columns {
            return Err(ConfigError::Invalid(format!(
                "max_columns ({}) is below min_columns ({})",
                self.max_columns, self.min_columns
            )));
        }
        if self.id_source_tag.is_empty() || self.id_source_tag.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "id_source_tag must be a non-empty word".to_string(),
            ));
        }
        Ok(())
    }
}
