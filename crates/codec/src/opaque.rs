//! Opaque structural codec (bincode).
//!
//! Serializes the whole `TypedValue` generically: exact variant and
//! structure are preserved for every value, with no tagging logic and no
//! warning path. The trade is transparency - entries are binary, not the
//! readable `"<Tag>:<payload>"` form.
//!
//! The byte format is bincode's default configuration. It is
//! implementation-defined, so the codec id (`"opaque-bincode-v1"`) versions
//! it: bump the id if the serializer or the `TypedValue` shape changes in
//! a way that breaks persisted data.

use tagdb_core::{CodecError, TypedValue, ValueCodec};

/// Structural codec preserving exact type and structure for any value.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueCodec;

impl ValueCodec for OpaqueCodec {
    fn encode(&self, value: &TypedValue) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::NotSerializable(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<TypedValue, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
    }

    fn codec_id(&self) -> &str {
        "opaque-bincode-v1"
    }
}
