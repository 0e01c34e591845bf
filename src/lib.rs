//! tagdb - typed values over a byte-only key-value store
//!
//! A byte-oriented key-value store accepts and returns only raw byte
//! sequences. tagdb layers typed reads and writes on top: text, integers,
//! floats, symbolic atoms and opaque payloads go in, and the original kind
//! comes back out on read.
//!
//! # Quick Start
//!
//! ```
//! use tagdb::{sym, MemoryBackend, TypedStore, TypedValue};
//!
//! let store = TypedStore::new(MemoryBackend::new());
//!
//! store.put(sym("abc"), 1.2)?;
//! store.put(123, "hi")?;
//! store.put(1.23, sym("symbol"))?;
//!
//! // The backend holds entries like `Integer:123` / `String:hi`;
//! // reads recover the original kinds.
//! assert_eq!(store.get(sym("abc"))?, Some(TypedValue::Float(1.2)));
//! assert_eq!(store.get(123)?, Some(TypedValue::Text("hi".into())));
//! # Ok::<(), tagdb::Error>(())
//! ```
//!
//! # Constraining keys
//!
//! Writes under a constrained key are coerced to the declared kind first:
//!
//! ```
//! use tagdb::{sym, MemoryBackend, TypeTag, TypedStore, TypedValue};
//!
//! let mut store = TypedStore::new(MemoryBackend::new());
//! store.constrain_key(sym("year"), TypeTag::Int)?;
//! store.put(sym("year"), "1999")?;
//! assert_eq!(store.get(sym("year"))?, Some(TypedValue::Int(1999)));
//! # Ok::<(), tagdb::Error>(())
//! ```
//!
//! # Architecture
//!
//! Three layers, composed by [`TypedStore`]: a [`ValueCodec`] translating
//! typed values to bytes (the readable [`TagCodec`] or the structural
//! [`OpaqueCodec`]), a [`ConstraintRegistry`] of per-key target kinds
//! applied on write, and the external [`KvBackend`] holding the bytes.

// Re-export the public API from the member crates
pub use tagdb_codec::{get_codec, OpaqueCodec, TagCodec, UnknownTagPolicy};
pub use tagdb_core::{sym, CodecError, Error, KvBackend, Result, TypeTag, TypedValue, ValueCodec};
pub use tagdb_store::{ConstraintRegistry, Entries, MemoryBackend, Schema, TypedStore};
