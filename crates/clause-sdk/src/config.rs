//! Configuration types for FilterEngine

use clause_runtime::{ComposerConfig, RecordShape};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Declaration file path(s), YAML or JSON by extension
    pub declaration_files: Vec<PathBuf>,

    /// Declaration documents (id, content) - alternative to file paths
    #[serde(skip)]
    pub declaration_contents: Vec<(String, String)>,

    /// Settings handed to every operator handler
    pub composer: ComposerConfig,

    /// Entity and columns the fragments may target
    pub record_shape: RecordShape,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration file
    pub fn with_declaration_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.declaration_files.push(path.into());
        self
    }

    /// Add a declaration document
    pub fn with_declaration_content(
        mut self,
        id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.declaration_contents.push((id.into(), content.into()));
        self
    }

    pub fn with_composer(mut self, composer: ComposerConfig) -> Self {
        self.composer = composer;
        self
    }

    pub fn with_record_shape(mut self, shape: RecordShape) -> Self {
        self.record_shape = shape;
        self
    }
}
