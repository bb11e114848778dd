//! # Type Registry
//!
//! Maps canonical type URIs to what the compiler should do with them:
//!
//! - [`TypeEntry::Builtin`]: a constructor that validates its parameters
//!   and builds a [`Schema`] node.
//! - [`TypeEntry::Alias`]: a learned type, stored as its raw definition
//!   and recompiled on every use.
//!
//! Builtins and aliases share one namespace. A URI is registered at most
//! once and entries are never replaced or removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use rx_core::{RxError, RxResult};

use crate::factory::Rx;
use crate::kinds::CoreType;
use crate::schema::Schema;

/// A builtin type: reports its URI and builds compiled nodes.
///
/// The fourteen core kinds implement this through [`CoreType`].
/// Applications can implement it to add their own kinds; the node they
/// build is usually a [`Schema::Custom`].
pub trait TypeConstructor: Send + Sync + fmt::Debug {
    /// The canonical URI this type is registered under.
    fn uri(&self) -> String;

    /// Validate the definition's parameters and build the node.
    ///
    /// `definition` always contains the `type` key. Nested definitions
    /// should be compiled through `rx` so they resolve against the same
    /// registries.
    fn build(&self, definition: &Map<String, Value>, rx: &Rx) -> RxResult<Schema>;
}

/// What a registered URI resolves to.
#[derive(Debug, Clone)]
pub enum TypeEntry {
    /// A constructor for a builtin or custom kind.
    Builtin(Arc<dyn TypeConstructor>),
    /// A learned type's raw definition.
    Alias(Value),
}

/// URI → [`TypeEntry`] table.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, TypeEntry>,
}

impl TypeRegistry {
    /// Create an empty registry. Nothing is implicitly available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the fourteen core types.
    pub fn with_core_types() -> Self {
        let entries = CoreType::ALL
            .iter()
            .map(|kind| {
                let entry: Arc<dyn TypeConstructor> = Arc::new(*kind);
                (kind.uri(), TypeEntry::Builtin(entry))
            })
            .collect();
        tracing::debug!(count = CoreType::ALL.len(), "registered core types");
        Self { entries }
    }

    /// Insert an entry under `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`RxError::DuplicateType`] if anything is already
    /// registered under `uri`.
    pub fn register(&mut self, uri: String, entry: TypeEntry) -> RxResult<()> {
        if self.entries.contains_key(&uri) {
            return Err(RxError::DuplicateType(uri));
        }
        self.entries.insert(uri, entry);
        Ok(())
    }

    /// Look up the entry for a URI.
    pub fn get(&self, uri: &str) -> Option<&TypeEntry> {
        self.entries.get(uri)
    }

    /// Check if a URI is registered.
    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    /// List all registered URIs, sorted.
    pub fn uris(&self) -> Vec<&str> {
        let mut uris: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        uris.sort();
        uris
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
