//! Dialect catalog for explicit dependency injection.
//!
//! The [`DialectCatalog`] is a registry of [`Dialect`] implementations.
//! Rather than a global singleton, it is explicitly constructed and handed
//! to whatever builds schema graphs, so initialization stays deterministic
//! and tests can register mock dialects.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, SchemaError};

use super::mysql::MySqlDialect;
use super::Dialect;

/// Registry of dialects by name.
#[derive(Default)]
pub struct DialectCatalog {
    dialects: HashMap<String, Arc<dyn Dialect>>,
}

impl DialectCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the built-in dialects registered.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register_dialect("mysql", MySqlDialect::new());
        catalog
    }

    /// Register a dialect by name.
    pub fn register_dialect(&mut self, name: impl Into<String>, dialect: impl Dialect + 'static) {
        self.dialects.insert(name.into(), Arc::new(dialect));
    }

    /// Register a dialect as an Arc (for sharing).
    pub fn register_dialect_arc(&mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) {
        self.dialects.insert(name.into(), dialect);
    }

    /// Get a dialect by name.
    pub fn get_dialect(&self, name: &str) -> Option<Arc<dyn Dialect>> {
        self.dialects.get(name).cloned()
    }

    /// Get a dialect by name, returning an error if not found.
    pub fn require_dialect(&self, name: &str) -> Result<Arc<dyn Dialect>> {
        self.get_dialect(name)
            .ok_or_else(|| SchemaError::UnknownDialect(name.to_string()))
    }

    /// Check if a dialect is registered.
    pub fn has_dialect(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    /// Get all registered dialect names.
    pub fn dialect_names(&self) -> Vec<&str> {
        self.dialects.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for DialectCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectCatalog")
            .field("dialects", &self.dialects.keys().collect::<Vec<_>>())
            .finish()
    }
}
