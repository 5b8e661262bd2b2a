use super::backend::Backend;
use crate::error::{CorTiltError, Result};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Explicit mapping from algorithm identifier to backend.
///
/// Lookup is by exact name. Registering a second backend under the same name
/// replaces the first.
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`BackendRegistry::register`].
    pub fn with(mut self, backend: Arc<dyn Backend>) -> Self {
        self.register(backend);
        self
    }

    /// Register `backend` under its own name, returning any backend it replaced.
    pub fn register(&mut self, backend: Arc<dyn Backend>) -> Option<Arc<dyn Backend>> {
        let name = backend.name().to_string();
        debug!("BackendRegistry::register name={name}");
        self.backends.insert(name, backend)
    }

    pub fn get(&self, algorithm: &str) -> Result<Arc<dyn Backend>> {
        self.backends
            .get(algorithm)
            .cloned()
            .ok_or_else(|| CorTiltError::UnknownAlgorithm(algorithm.to_string()))
    }

    pub fn contains(&self, algorithm: &str) -> bool {
        self.backends.contains_key(algorithm)
    }

    /// Registered algorithm identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    pub fn allowed_filters(&self, algorithm: &str) -> Result<BTreeSet<String>> {
        Ok(self.get(algorithm)?.allowed_filters())
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.backends.keys().collect::<Vec<_>>())
            .finish()
    }
}
