//! Core types and traits for tagdb
//!
//! This crate defines the foundational types used throughout the system:
//! - TypedValue: closed tagged union over the supported semantic types
//! - TypeTag: the built-in, constraint-eligible kinds and their wire names
//! - Error: error type hierarchy
//! - Traits: core trait definitions (ValueCodec, KvBackend)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tag;
pub mod traits;
pub mod value;

// Re-export commonly used types and traits
pub use error::{CodecError, Error, Result};
pub use tag::TypeTag;
pub use traits::{KvBackend, ValueCodec};
pub use value::{sym, TypedValue};
