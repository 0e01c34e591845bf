//! Error types for the typed store.
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Unconvertible types seen during encode are NOT represented here: that
//! path is a non-fatal diagnostic emitted on the `tracing` warn channel
//! while execution continues. Everything below is surfaced to the caller
//! of the failing operation; the store never retries, buffers a failed
//! write, or stores a partially-encoded entry.

use std::io;

use thiserror::Error;

use crate::tag::TypeTag;

/// Result type alias for typed-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the typed store
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying key-value backend I/O error, propagated unchanged
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encode/decode failure in the active codec
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A constrained key's incoming value cannot be converted to the
    /// declared target kind
    #[error("cannot coerce {from} value to {target}: {reason}")]
    Coercion {
        /// Wire tag of the incoming value
        from: String,
        /// Declared target kind
        target: TypeTag,
        /// What the conversion function rejected
        reason: String,
    },

    /// A key was constrained to a kind with no registered converter
    #[error("no converter registered for constraint target {0:?}")]
    UnsupportedConstraint(String),
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Decode met a tag with no registered converter (strict mode only)
    #[error("unknown type tag {0:?}")]
    UnknownTag(String),

    /// Tag-based entry with no `:` separator
    #[error("missing tag separator in encoded entry")]
    MissingSeparator,

    /// Entry bytes are not valid UTF-8 where the format requires it
    #[error("encoded entry is not valid UTF-8")]
    Malformed,

    /// The payload does not parse as the kind its tag names
    #[error("invalid {tag} payload: {reason}")]
    InvalidPayload {
        /// Wire tag the entry claimed
        tag: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The value cannot be structurally serialized (opaque codec only)
    #[error("value cannot be serialized: {0}")]
    NotSerializable(String),

    /// Structural deserialization failed on corrupt or foreign bytes
    #[error("invalid opaque encoding: {0}")]
    InvalidEncoding(String),
}
