//! Clause command-line tool
//!
//! Composes a declaration file against a JSON parameter context and prints
//! the resulting condition tree.

mod config;

use crate::config::CliConfig;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clause_sdk::{ConditionTree, EngineConfig, FilterEngine, HandlerRegistry, ParameterContext};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "clause")]
#[command(about = "Compose field declarations into condition trees")]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to clause.{yaml,toml,json} when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a declaration file against a parameter context
    Compose {
        /// Declaration file, YAML or JSON by extension
        #[arg(short, long)]
        declarations: PathBuf,

        /// JSON object holding the parameters; empty context when omitted
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Output format (overrides the configured default)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the registered operator kinds
    Operators,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn from_config(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(OutputFormat::Text),
            Some(s) => match OutputFormat::from_str(s, true) {
                Ok(format) => Ok(format),
                Err(_) => bail!("Unknown output format '{}' in configuration", s),
            },
        }
    }
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Compose {
            declarations,
            context,
            format,
        } => {
            let format = match format {
                Some(format) => format,
                None => OutputFormat::from_config(config.format.as_deref())?,
            };
            let tree = compose(&config, &declarations, context.as_deref())?;
            println!("{}", render(&tree, format)?);
        }
        Commands::Operators => {
            for kind in HandlerRegistry::with_builtins().kinds() {
                println!("{kind}");
            }
        }
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clause_cli=info,clause_sdk=info,clause_runtime=warn".into()
            }),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

fn compose(config: &CliConfig, declarations: &Path, context: Option<&Path>) -> Result<ConditionTree> {
    let engine_config = config.apply(EngineConfig::new().with_declaration_file(declarations))?;
    let engine = FilterEngine::builder().with_config(engine_config).build()?;
    info!(
        "Loaded {} declarations from {}",
        engine.declarations().len(),
        declarations.display()
    );

    let ctx = match context {
        Some(path) => read_context(path)?,
        None => ParameterContext::new(),
    };

    Ok(engine.compose(&ctx)?)
}

fn read_context(path: &Path) -> Result<ParameterContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Context file {} is not valid JSON", path.display()))?;
    ParameterContext::from_json(json)
        .with_context(|| format!("Context file {} must hold a JSON object", path.display()))
}

fn render(tree: &ConditionTree, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => tree.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(tree)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_compose_args() {
        let cli = Cli::try_parse_from([
            "clause",
            "compose",
            "--declarations",
            "filters.yaml",
            "--context",
            "ctx.json",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Compose {
                declarations,
                context,
                format,
            } => {
                assert_eq!(declarations, PathBuf::from("filters.yaml"));
                assert_eq!(context, Some(PathBuf::from("ctx.json")));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            Commands::Operators => panic!("expected compose"),
        }
    }

    #[test]
    fn test_declarations_required() {
        assert!(Cli::try_parse_from(["clause", "compose"]).is_err());
    }

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config(None).unwrap(), OutputFormat::Text);
        assert_eq!(
            OutputFormat::from_config(Some("JSON")).unwrap(),
            OutputFormat::Json
        );
        assert!(OutputFormat::from_config(Some("xml")).is_err());
    }

    #[test]
    fn test_compose_files() {
        let dir = tempfile::tempdir().unwrap();
        let decls = write(
            &dir,
            "filters.yaml",
            r#"
declarations:
  - field: age
    operator: LESS_THAN
    value: 30
  - field: name
    operator: EQUALS
    mode: OR
    value: Tom
    match: "age > 18"
"#,
        );
        let ctx = write(&dir, "ctx.json", r#"{ "age": 19 }"#);

        let tree = compose(&CliConfig::default(), &decls, Some(&ctx)).unwrap();
        assert_eq!(
            render(&tree, OutputFormat::Text).unwrap(),
            "(age < 30 OR name = 'Tom')"
        );

        let json: serde_json::Value =
            serde_json::from_str(&render(&tree, OutputFormat::Json).unwrap()).unwrap();
        assert!(json["root"]["or"].is_array());
    }

    #[test]
    fn test_context_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        let decls = write(&dir, "filters.yaml", "[]");
        let ctx = write(&dir, "ctx.json", "[1, 2]");

        let err = compose(&CliConfig::default(), &decls, Some(&ctx)).unwrap_err();
        assert!(err.to_string().contains("must hold a JSON object"));
    }

    #[test]
    fn test_empty_context_when_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let decls = write(
            &dir,
            "filters.json",
            r#"[{ "field": "deleted_at", "operator": "IS_NULL", "value": null }]"#,
        );

        let tree = compose(&CliConfig::default(), &decls, None).unwrap();
        assert_eq!(tree.to_string(), "deleted_at IS NULL");
    }
}
