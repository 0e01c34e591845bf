//! TypedStore: the public typed-store facade.
//!
//! ## Design
//!
//! TypedStore composes the three collaborators and nothing else: the
//! active [`ValueCodec`] on both sides of every operation, the
//! [`ConstraintRegistry`] on every write, and the [`KvBackend`] for the
//! bytes. It holds no state machine of its own - open/closed is the
//! backend's lifecycle.
//!
//! ## Write path
//!
//! `put` encodes the key exactly once (so an unconvertible key warns at
//! most once per call), consults the registry with the encoded key, and
//! coerces the value on a hit before encoding it. A failed coercion
//! surfaces to the caller and prevents the write; no partially-encoded
//! entry is ever stored.
//!
//! ## Thread Safety
//!
//! Read/write operations take `&self` and are as shareable as the
//! backend is. Constraint registration takes `&mut self`: the registry
//! is deliberately unsynchronized, so mutation is serialized by the
//! borrow checker instead of a lock.

use tagdb_codec::TagCodec;
use tagdb_core::{Error, KvBackend, Result, TypeTag, TypedValue, ValueCodec};

use crate::registry::ConstraintRegistry;
use crate::schema::Schema;

/// Typed wrapper over a byte-only key-value backend.
///
/// # Example
///
/// ```
/// use tagdb_store::{MemoryBackend, TypedStore};
/// use tagdb_core::{sym, TypedValue};
///
/// let store = TypedStore::new(MemoryBackend::new());
/// store.put(sym("abc"), 1.2)?;
/// store.put(123, "hi")?;
///
/// assert_eq!(store.get(sym("abc"))?, Some(TypedValue::Float(1.2)));
/// assert_eq!(store.get(123)?, Some(TypedValue::Text("hi".into())));
/// # Ok::<(), tagdb_core::Error>(())
/// ```
pub struct TypedStore<B: KvBackend> {
    backend: B,
    codec: Box<dyn ValueCodec>,
    constraints: ConstraintRegistry,
}

impl<B: KvBackend> TypedStore<B> {
    /// Store over `backend` with the default tag-based codec.
    pub fn new(backend: B) -> Self {
        Self::with_codec(backend, Box::new(TagCodec::new()))
    }

    /// Store over `backend` with an explicit codec.
    pub fn with_codec(backend: B, codec: Box<dyn ValueCodec>) -> Self {
        TypedStore {
            backend,
            codec,
            constraints: ConstraintRegistry::new(),
        }
    }

    /// Store seeded with a schema's constraints.
    ///
    /// The schema is snapshotted through the active codec at this point;
    /// constraints declared on it afterwards do not apply to this
    /// instance, and instance-level [`TypedStore::constrain_key`] calls
    /// never touch the schema.
    pub fn with_schema(backend: B, codec: Box<dyn ValueCodec>, schema: &Schema) -> Result<Self> {
        let constraints = ConstraintRegistry::from_schema(schema, codec.as_ref())?;
        Ok(TypedStore {
            backend,
            codec,
            constraints,
        })
    }

    /// Identifier of the active codec's byte format.
    pub fn codec_id(&self) -> &str {
        self.codec.codec_id()
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Constrain values written under `key` to `target` on this instance.
    pub fn constrain_key(&mut self, key: impl Into<TypedValue>, target: TypeTag) -> Result<()> {
        let key_bytes = self.codec.encode(&key.into())?;
        self.constraints.constrain(key_bytes, target);
        Ok(())
    }

    /// Write `value` under `key`.
    ///
    /// If the key carries a constraint, the value is first coerced to the
    /// declared kind; a failed coercion is returned to the caller and
    /// nothing is written. The key itself is never coerced.
    pub fn put(&self, key: impl Into<TypedValue>, value: impl Into<TypedValue>) -> Result<()> {
        let key_bytes = self.codec.encode(&key.into())?;
        let mut value = value.into();
        if let Some(target) = self.constraints.lookup(&key_bytes) {
            value = value.coerce(target)?;
        }
        let value_bytes = self.codec.encode(&value)?;
        self.backend.put(key_bytes, value_bytes)?;
        Ok(())
    }

    /// Read the value under `key`, decoded to its original kind.
    ///
    /// An absent key is `Ok(None)`, not an error.
    pub fn get(&self, key: impl Into<TypedValue>) -> Result<Option<TypedValue>> {
        let key_bytes = self.codec.encode(&key.into())?;
        match self.backend.get(&key_bytes)? {
            Some(value_bytes) => Ok(Some(self.codec.decode(&value_bytes)?)),
            None => Ok(None),
        }
    }

    /// Remove the entry under `key`. Returns whether it existed.
    pub fn delete(&self, key: impl Into<TypedValue>) -> Result<bool> {
        let key_bytes = self.codec.encode(&key.into())?;
        Ok(self.backend.delete(&key_bytes)?)
    }

    /// Whether an entry exists under `key`.
    pub fn contains(&self, key: impl Into<TypedValue>) -> Result<bool> {
        let key_bytes = self.codec.encode(&key.into())?;
        Ok(self.backend.get(&key_bytes)?.is_some())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// All stored keys, decoded.
    pub fn keys(&self) -> Result<Vec<TypedValue>> {
        self.backend
            .iter()
            .map(|(k, _)| self.codec.decode(&k).map_err(Error::from))
            .collect()
    }

    /// Iterate all entries, decoding each key and value through the
    /// active codec before yielding.
    ///
    /// The sequence is lazy on the decode side and restartable: each call
    /// starts a fresh pass. Ordering follows the backend's native
    /// iteration order; this layer adds no ordering of its own. A
    /// malformed entry yields an `Err` item without ending the walk, so
    /// callers choose whether foreign data aborts or is skipped.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            inner: self.backend.iter(),
            codec: self.codec.as_ref(),
        }
    }
}

/// Decoded-entry iterator returned by [`TypedStore::iter`].
pub struct Entries<'a> {
    inner: Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>,
    codec: &'a dyn ValueCodec,
}

impl Iterator for Entries<'_> {
    type Item = Result<(TypedValue, TypedValue)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key_bytes, value_bytes) = self.inner.next()?;
        let decoded = self
            .codec
            .decode(&key_bytes)
            .and_then(|key| self.codec.decode(&value_bytes).map(|value| (key, value)));
        Some(decoded.map_err(Error::from))
    }
}
