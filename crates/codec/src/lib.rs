//! Value codecs for tagdb.
//!
//! Two alternative encodings of [`TypedValue`](tagdb_core::TypedValue)
//! into the raw bytes a [`KvBackend`](tagdb_core::KvBackend) stores:
//!
//! - [`TagCodec`]: human-readable `"<Tag>:<payload>"` entries for a small
//!   fixed type set, with a warn-and-fallback path for everything else
//! - [`OpaqueCodec`]: structural serialization that round-trips every
//!   value exactly but gives up on-disk transparency
//!
//! Pick `TagCodec` when on-disk transparency matters more than generality;
//! pick `OpaqueCodec` when arbitrary values must round-trip exactly.
//!
//! # Usage
//!
//! ```
//! use tagdb_codec::TagCodec;
//! use tagdb_core::{TypedValue, ValueCodec};
//!
//! let codec = TagCodec::new();
//! let encoded = codec.encode(&TypedValue::Int(123))?;
//! assert_eq!(encoded, b"Integer:123");
//!
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded, TypedValue::Int(123));
//! # Ok::<(), tagdb_core::CodecError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod opaque;
mod tag;

pub use opaque::OpaqueCodec;
pub use tag::{TagCodec, UnknownTagPolicy};

use tagdb_core::{CodecError, ValueCodec};

/// Get a codec by its identifier.
///
/// Returns the codec if recognized, or an error for unknown codec IDs.
/// Useful when the codec id was persisted alongside the data.
///
/// # Known Codecs
///
/// - `"tag-v1"`: tag-based `"<Tag>:<payload>"` entries
/// - `"opaque-bincode-v1"`: structural bincode serialization
pub fn get_codec(codec_id: &str) -> Result<Box<dyn ValueCodec>, CodecError> {
    match codec_id {
        "tag-v1" => Ok(Box::new(TagCodec::new())),
        "opaque-bincode-v1" => Ok(Box::new(OpaqueCodec)),
        _ => Err(CodecError::InvalidEncoding(format!(
            "unknown codec id {codec_id:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tag_codec() {
        let codec = get_codec("tag-v1").unwrap();
        assert_eq!(codec.codec_id(), "tag-v1");
    }

    #[test]
    fn test_get_opaque_codec() {
        let codec = get_codec("opaque-bincode-v1").unwrap();
        assert_eq!(codec.codec_id(), "opaque-bincode-v1");
    }

    #[test]
    fn test_get_unknown_codec() {
        assert!(get_codec("gzip").is_err());
    }
}
