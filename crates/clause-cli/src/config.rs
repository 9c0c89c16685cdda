//! CLI configuration

use anyhow::{bail, Context, Result};
use clause_sdk::{ComposerConfig, EngineConfig, RecordShape};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings read from `clause.{yaml,toml,json}` and `CLAUSE_*` variables
///
/// Every field is optional; anything left unset keeps the engine default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Escape character written into LIKE patterns
    pub like_escape: Option<String>,

    /// Whether blank values make handlers skip their field
    pub skip_blank_values: Option<bool>,

    /// Entity name of the record shape
    pub entity: Option<String>,

    /// Known columns; unset accepts any column
    pub columns: Option<Vec<String>>,

    /// Default output format, `text` or `json`
    pub format: Option<String>,
}

impl CliConfig {
    /// Load configuration from `.env`, the config file and the environment
    ///
    /// An explicit `path` must exist; otherwise `clause.*` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("clause").required(false),
        };

        let cfg = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("CLAUSE")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("columns"),
            )
            .build()
            .context("Failed to read configuration")?;

        cfg.try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Overlay these settings on an engine configuration
    pub fn apply(&self, mut engine: EngineConfig) -> Result<EngineConfig> {
        let mut composer: ComposerConfig = engine.composer.clone();
        if let Some(escape) = &self.like_escape {
            let mut chars = escape.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => composer = composer.with_like_escape(c),
                _ => bail!("like_escape must be a single character, got '{}'", escape),
            }
        }
        if let Some(skip) = self.skip_blank_values {
            composer = composer.with_skip_blank_values(skip);
        }
        engine.composer = composer;

        if self.entity.is_some() || self.columns.is_some() {
            let entity = self
                .entity
                .clone()
                .unwrap_or_else(|| engine.record_shape.entity.clone());
            let mut shape = RecordShape::new(entity);
            if let Some(columns) = &self.columns {
                shape = shape.with_columns(columns.iter().cloned());
            }
            engine.record_shape = shape;
        }

        Ok(engine)
    }
}
