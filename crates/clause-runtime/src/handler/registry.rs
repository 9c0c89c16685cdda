//! Handler registry
//!
//! Operator kind -> handler. Kinds are case-insensitive and stored upper-cased.

use super::builtin;
use super::OperatorHandler;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<HandlerRegistry>> = OnceLock::new();

/// Registry of operator handlers
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn OperatorHandler>>,
}

impl HandlerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in handler
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for handler in builtin::all() {
            registry.register_arc(handler);
        }
        registry
    }

    /// Register a handler under its kind, replacing any previous one
    pub fn register<H: OperatorHandler + 'static>(&mut self, handler: H) {
        self.register_arc(Arc::new(handler));
    }

    pub fn register_arc(&mut self, handler: Arc<dyn OperatorHandler>) {
        let kind = normalize(handler.kind());
        if self.handlers.insert(kind.clone(), handler).is_some() {
            tracing::debug!("Replaced handler for operator {}", kind);
        }
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn OperatorHandler>> {
        self.handlers.get(&normalize(kind)).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(&normalize(kind))
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Install the process-wide registry
    ///
    /// Returns `false` if it was already initialised, in which case `registry`
    /// is dropped.
    pub fn install_global(registry: HandlerRegistry) -> bool {
        GLOBAL.set(Arc::new(registry)).is_ok()
    }

    /// Process-wide registry, the built-ins unless one was installed first
    pub fn global() -> Arc<HandlerRegistry> {
        GLOBAL
            .get_or_init(|| Arc::new(HandlerRegistry::with_builtins()))
            .clone()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

fn normalize(kind: &str) -> String {
    kind.trim().to_ascii_uppercase()
}
