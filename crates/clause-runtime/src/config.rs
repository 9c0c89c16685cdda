//! Composer configuration

use serde::{Deserialize, Serialize};

/// Settings shared by every handler during one composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Escape character written into LIKE patterns
    pub like_escape: char,

    /// Treat null, blank strings and empty sequences as "no value" and skip the field
    pub skip_blank_values: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            like_escape: '\\',
            skip_blank_values: true,
        }
    }
}

impl ComposerConfig {
    pub fn with_like_escape(mut self, escape: char) -> Self {
        self.like_escape = escape;
        self
    }

    pub fn with_skip_blank_values(mut self, skip: bool) -> Self {
        self.skip_blank_values = skip;
        self
    }
}
