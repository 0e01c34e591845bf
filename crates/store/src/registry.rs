//! Per-instance constraint registry.
//!
//! Maps encoded key bytes to the target kind their values are coerced to
//! on write. Keys are kept in encoded form because that is the identity
//! the store works with: whatever the active codec makes of a key is what
//! lookups during `put` see.

use std::collections::HashMap;

use tagdb_core::{Result, TypeTag, ValueCodec};

use crate::schema::Schema;

/// Mapping from encoded key to the declared target kind for its values.
///
/// Read on every write, never auto-expired. One registry per store
/// instance; the registry performs no locking of its own, so concurrent
/// mutation must be serialized by the caller (the facade does this by
/// taking `&mut self` for constraint registration).
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    by_key: HashMap<Vec<u8>, TypeTag>,
}

impl ConstraintRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a schema's declarations through the active codec.
    ///
    /// Called once at store construction. The schema is copied, not
    /// referenced: constraints declared on it afterwards do not appear
    /// here.
    pub fn from_schema(schema: &Schema, codec: &dyn ValueCodec) -> Result<Self> {
        let mut registry = Self::new();
        for (key, target) in schema.constraints() {
            registry.constrain(codec.encode(key)?, target);
        }
        Ok(registry)
    }

    /// Register (or re-register) a constraint for an encoded key.
    pub fn constrain(&mut self, key: Vec<u8>, target: TypeTag) {
        self.by_key.insert(key, target);
    }

    /// Target kind for an encoded key, if one is registered.
    pub fn lookup(&self, key: &[u8]) -> Option<TypeTag> {
        self.by_key.get(key).copied()
    }

    /// Number of registered constraints.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no constraints are registered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
