//! Named engine registry.
//!
//! Engines are built once and shared. A `SchemaRegistry` can be owned
//! directly, or the process-wide one can be used through the free functions.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::pipeline::engine::SchemaEngine;

/// Engines keyed by name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    engines: HashMap<String, Arc<SchemaEngine>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an engine under `name`, replacing any previous one.
    ///
    /// The engine is renamed to `name` so its logs carry the registry key.
    pub fn register(&mut self, name: &str, engine: SchemaEngine) -> Arc<SchemaEngine> {
        let engine = Arc::new(engine.with_name(name));
        if self
            .engines
            .insert(name.to_string(), Arc::clone(&engine))
            .is_some()
        {
            log::info!("SCHEMA_REPLACED name={}", name);
        } else {
            log::info!(
                "SCHEMA_REGISTERED name={} fields={}",
                name,
                engine.schema().len()
            );
        }
        engine
    }

    pub fn get(&self, name: &str) -> Option<Arc<SchemaEngine>> {
        self.engines.get(name).cloned()
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<SchemaEngine>> {
        self.engines.remove(name)
    }

    /// Registered names, sorted.
    pub fn schema_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn clear(&mut self) {
        self.engines.clear();
    }
}

// Global registry with thread-safe access
lazy_static! {
    static ref SCHEMA_REGISTRY: RwLock<SchemaRegistry> = RwLock::new(SchemaRegistry::new());
}

/// Register an engine in the global registry.
pub fn register_engine(name: &str, engine: SchemaEngine) -> Arc<SchemaEngine> {
    SCHEMA_REGISTRY.write().register(name, engine)
}

/// Look up an engine in the global registry.
pub fn get_engine(name: &str) -> Option<Arc<SchemaEngine>> {
    SCHEMA_REGISTRY.read().get(name)
}

/// Remove an engine from the global registry.
pub fn unregister_engine(name: &str) -> Option<Arc<SchemaEngine>> {
    SCHEMA_REGISTRY.write().remove(name)
}

/// Names registered in the global registry.
pub fn schema_names() -> Vec<String> {
    SCHEMA_REGISTRY.read().schema_names()
}

/// Clear the global registry.
pub fn clear_registry() {
    SCHEMA_REGISTRY.write().clear();
    log::info!("SCHEMA_REGISTRY_CLEARED");
}
