//! Builder pattern for FilterEngine

use crate::config::EngineConfig;
use crate::engine::FilterEngine;
use crate::error::{Result, SdkError};
use clause_core::FieldDeclaration;
use clause_parser::DeclarationParser;
use clause_runtime::{
    ComposerConfig, ConditionComposer, HandlerRegistry, OperatorHandler, RecordShape,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builder for FilterEngine
///
/// # Example
///
/// ```rust,ignore
/// use clause_sdk::FilterEngine;
///
/// let engine = FilterEngine::builder()
///     .add_declarations_file("filters/user.yaml")
///     .register_handler(MyRegexHandler)
///     .build()?;
///
/// let tree = engine.compose(&ctx)?;
/// ```
pub struct FilterEngineBuilder {
    config: EngineConfig,
    registry: Option<HandlerRegistry>,
    handlers: Vec<Arc<dyn OperatorHandler>>,
}

impl FilterEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            registry: None,
            handlers: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from this registry instead of the built-in handlers
    pub fn with_registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register an extra operator handler
    pub fn register_handler<H: OperatorHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Add a declaration file
    pub fn add_declarations_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.declaration_files.push(path.into());
        self
    }

    /// Add declaration content directly (alternative to file path)
    ///
    /// An `id` ending in `.json` is parsed as JSON, anything else as YAML.
    pub fn add_declarations_content(
        mut self,
        id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.config
            .declaration_contents
            .push((id.into(), content.into()));
        self
    }

    pub fn with_composer_config(mut self, composer: ComposerConfig) -> Self {
        self.config.composer = composer;
        self
    }

    pub fn with_record_shape(mut self, shape: RecordShape) -> Self {
        self.config.record_shape = shape;
        self
    }

    /// Load every declaration source and build the engine
    pub fn build(self) -> Result<FilterEngine> {
        validate_composer(&self.config.composer)?;

        let mut registry = self.registry.unwrap_or_else(HandlerRegistry::with_builtins);
        for handler in self.handlers {
            registry.register_arc(handler);
        }

        let mut declarations = Vec::new();
        for path in &self.config.declaration_files {
            let loaded = load_file(path)?;
            tracing::info!(
                "Loaded {} declarations from {}",
                loaded.len(),
                path.display()
            );
            declarations.extend(loaded);
        }
        for (id, content) in &self.config.declaration_contents {
            let loaded = parse_content(id, content)?;
            tracing::debug!("Loaded {} declarations from '{}'", loaded.len(), id);
            declarations.extend(loaded);
        }

        for decl in &declarations {
            if !registry.contains(&decl.operator) {
                tracing::warn!(
                    "Field '{}' uses unregistered operator {}; composing it will fail unless gated out",
                    decl.field,
                    decl.operator
                );
            }
        }

        let composer = ConditionComposer::new(Arc::new(registry))
            .with_config(self.config.composer)
            .with_record_shape(self.config.record_shape);

        Ok(FilterEngine::new(declarations, composer))
    }
}

impl Default for FilterEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A wildcard cannot double as the LIKE escape character
fn validate_composer(config: &ComposerConfig) -> Result<()> {
    if matches!(config.like_escape, '%' | '_') {
        return Err(SdkError::ConfigError(format!(
            "like_escape cannot be the wildcard '{}'",
            config.like_escape
        )));
    }
    Ok(())
}

fn is_json(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_content(id: &str, content: &str) -> Result<Vec<FieldDeclaration>> {
    let parsed = if is_json(id) {
        DeclarationParser::parse_json(content)
    } else {
        DeclarationParser::parse_yaml(content)
    };
    Ok(parsed?)
}

fn load_file(path: &Path) -> Result<Vec<FieldDeclaration>> {
    let content = std::fs::read_to_string(path)?;
    let parsed = if is_json(&path.to_string_lossy()) {
        DeclarationParser::parse_json(&content)
    } else {
        DeclarationParser::parse_yaml(&content)
    };
    parsed.map_err(|source| SdkError::InvalidDeclarationFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_sources() {
        let builder = FilterEngineBuilder::new()
            .add_declarations_file("a.yaml")
            .add_declarations_file("b.json")
            .add_declarations_content("inline", "[]")
            .with_record_shape(RecordShape::new("user"));

        assert_eq!(builder.config.declaration_files.len(), 2);
        assert_eq!(builder.config.declaration_contents.len(), 1);
        assert_eq!(builder.config.record_shape.entity, "user");
    }

    #[test]
    fn test_json_detection() {
        assert!(is_json("filters.json"));
        assert!(is_json("FILTERS.JSON"));
        assert!(!is_json("filters.yaml"));
        assert!(!is_json("inline"));
    }

    #[test]
    fn test_build_from_content() {
        let engine = FilterEngineBuilder::new()
            .add_declarations_content(
                "users",
                "- field: age\n  operator: less_than\n  value: 30\n",
            )
            .add_declarations_content(
                "more.json",
                r#"[{ "field": "name", "operator": "EQUALS", "value": "Tom", "mode": "OR" }]"#,
            )
            .build()
            .unwrap();

        assert_eq!(engine.declarations().len(), 2);
        assert_eq!(engine.declarations()[0].operator, "LESS_THAN");
    }

    #[test]
    fn test_build_rejects_wildcard_escape() {
        for escape in ['%', '_'] {
            let result = FilterEngineBuilder::new()
                .with_composer_config(ComposerConfig::default().with_like_escape(escape))
                .build();
            match result {
                Err(SdkError::ConfigError(msg)) => assert!(msg.contains(escape)),
                Err(other) => panic!("unexpected error: {other:?}"),
                Ok(_) => panic!("wildcard escape '{escape}' was accepted"),
            }
        }

        let engine = FilterEngineBuilder::new()
            .with_composer_config(ComposerConfig::default().with_like_escape('!'))
            .build()
            .unwrap();
        assert_eq!(engine.composer().config().like_escape, '!');
    }

    #[test]
    fn test_build_rejects_bad_content() {
        let result = FilterEngineBuilder::new()
            .add_declarations_content("bad", "declarations: 42")
            .build();
        assert!(matches!(result, Err(SdkError::ParseError(_))));
    }
}
