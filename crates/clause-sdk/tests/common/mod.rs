//! Common test utilities for SDK integration tests

use clause_sdk::{FilterEngine, FilterEngineBuilder};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Declaration files written into a scratch directory
pub struct DeclarationDir {
    dir: TempDir,
}

impl DeclarationDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Write `content` to `name` and return the full path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create declaration file");
        file.write_all(content.trim_start().as_bytes())
            .expect("write declaration file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Build an engine from a single inline YAML document
pub fn engine_from_yaml(yaml: &str) -> FilterEngine {
    FilterEngineBuilder::new()
        .add_declarations_content("inline", yaml.trim())
        .build()
        .expect("build engine")
}
