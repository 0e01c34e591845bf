//! Tag-based codec: `"<Tag>:<payload>"` entries.
//!
//! Encodes a value as its wire tag, a single `:` separator, and the
//! value's default textual rendering. Decoding splits at the FIRST `:`
//! only, so payloads may contain further colons harmlessly; tags are
//! assumed separator-free.
//!
//! ## Unknown types
//!
//! Writing a value with no registered converter emits one diagnostic on
//! the warn channel and falls back to `"<type_name>:<rendering>"`; such
//! entries round-trip only by coincidence. The read-side handling of an
//! unknown tag is governed by [`UnknownTagPolicy`].

use tracing::warn;

use tagdb_core::{CodecError, TypeTag, TypedValue, ValueCodec};

/// What `decode` does with a tag that has no registered converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Warn and yield the entry as an `Opaque` value carrying the tag and
    /// raw payload. Symmetric with the warn-and-continue write path.
    #[default]
    Preserve,
    /// Fail with [`CodecError::UnknownTag`]. Compatibility mode for
    /// deployments that treated foreign entries as hard corruption.
    Fail,
}

/// Tag-based codec over `"<Tag>:<payload>"` byte entries.
///
/// On-disk entries are ASCII tags with UTF-8 payloads, e.g. `String:hi`,
/// `Integer:123`, `Float:1.2`, `Symbol:abc`. The legacy `Fixnum` tag is
/// accepted on decode as an alias for `Integer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagCodec {
    unknown_tags: UnknownTagPolicy,
}

impl TagCodec {
    /// Codec with the default [`UnknownTagPolicy::Preserve`] read policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with an explicit read policy for unknown tags.
    pub fn with_policy(unknown_tags: UnknownTagPolicy) -> Self {
        TagCodec { unknown_tags }
    }

    /// Codec that fails decode on unknown tags.
    pub fn strict() -> Self {
        Self::with_policy(UnknownTagPolicy::Fail)
    }
}

impl ValueCodec for TagCodec {
    fn encode(&self, value: &TypedValue) -> Result<Vec<u8>, CodecError> {
        if let TypedValue::Opaque { type_name, .. } = value {
            // One diagnostic per encode call; the write itself proceeds.
            warn!(
                target: "tagdb::codec",
                type_name = %type_name,
                "no converter for {type_name}; storing textual rendering"
            );
        }
        let tag = value.type_name();
        let payload = value.render();
        let mut out = Vec::with_capacity(tag.len() + 1 + payload.len());
        out.extend_from_slice(tag.as_bytes());
        out.push(b':');
        out.extend_from_slice(payload.as_bytes());
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<TypedValue, CodecError> {
        let sep = bytes
            .iter()
            .position(|&b| b == b':')
            .ok_or(CodecError::MissingSeparator)?;
        let tag = std::str::from_utf8(&bytes[..sep]).map_err(|_| CodecError::Malformed)?;
        let payload = &bytes[sep + 1..];

        let Some(kind) = TypeTag::from_wire(tag) else {
            return match self.unknown_tags {
                UnknownTagPolicy::Fail => Err(CodecError::UnknownTag(tag.to_string())),
                UnknownTagPolicy::Preserve => {
                    warn!(
                        target: "tagdb::codec",
                        type_name = %tag,
                        "no converter for {tag}; preserving raw payload"
                    );
                    Ok(TypedValue::Opaque {
                        type_name: tag.to_string(),
                        bytes: payload.to_vec(),
                    })
                }
            };
        };

        let text = std::str::from_utf8(payload).map_err(|_| CodecError::Malformed)?;
        let invalid = |reason: String| CodecError::InvalidPayload {
            tag: tag.to_string(),
            reason,
        };
        match kind {
            TypeTag::Text => Ok(TypedValue::Text(text.to_string())),
            TypeTag::Int => text
                .parse::<i64>()
                .map(TypedValue::Int)
                .map_err(|e| invalid(e.to_string())),
            TypeTag::Float => text
                .parse::<f64>()
                .map(TypedValue::Float)
                .map_err(|e| invalid(e.to_string())),
            TypeTag::Symbol => Ok(TypedValue::Symbol(text.to_string())),
        }
    }

    fn codec_id(&self) -> &str {
        "tag-v1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagdb_core::sym;

    fn roundtrip(codec: &TagCodec, value: TypedValue) -> TypedValue {
        codec.decode(&codec.encode(&value).unwrap()).unwrap()
    }

    // ========== Wire format ==========

    #[test]
    fn test_encode_builtins_exact_bytes() {
        let codec = TagCodec::new();
        assert_eq!(codec.encode(&TypedValue::Text("hi".into())).unwrap(), b"String:hi");
        assert_eq!(codec.encode(&TypedValue::Int(123)).unwrap(), b"Integer:123");
        assert_eq!(codec.encode(&TypedValue::Float(1.2)).unwrap(), b"Float:1.2");
        assert_eq!(codec.encode(&sym("abc")).unwrap(), b"Symbol:abc");
    }

    #[test]
    fn test_decode_legacy_fixnum_tag() {
        let codec = TagCodec::new();
        assert_eq!(codec.decode(b"Fixnum:123").unwrap(), TypedValue::Int(123));
    }

    #[test]
    fn test_roundtrip_builtins() {
        let codec = TagCodec::new();
        for v in [
            TypedValue::Text("hello world".into()),
            TypedValue::Int(-9_000_000),
            TypedValue::Float(-0.25),
            sym("state"),
        ] {
            assert_eq!(roundtrip(&codec, v.clone()), v);
        }
    }

    #[test]
    fn test_split_at_first_separator_only() {
        let codec = TagCodec::new();
        let encoded = codec.encode(&TypedValue::Text("a:b:c".into())).unwrap();
        assert_eq!(encoded, b"String:a:b:c");
        assert_eq!(codec.decode(&encoded).unwrap(), TypedValue::Text("a:b:c".into()));
    }

    #[test]
    fn test_empty_payload() {
        let codec = TagCodec::new();
        assert_eq!(codec.decode(b"String:").unwrap(), TypedValue::Text("".into()));
        assert_eq!(codec.decode(b"Symbol:").unwrap(), sym(""));
    }

    #[test]
    fn test_float_rendering_roundtrips() {
        let codec = TagCodec::new();
        // Display of f64 is shortest-exact, so the parse recovers the bits
        for f in [0.1, 1.0, -1.5e300, f64::MIN_POSITIVE] {
            assert_eq!(roundtrip(&codec, TypedValue::Float(f)), TypedValue::Float(f));
        }
    }

    // ========== Unknown types ==========

    #[test]
    fn test_encode_opaque_falls_back() {
        let codec = TagCodec::new();
        let v = TypedValue::opaque("Object", b"#<Object:0x240798>".to_vec());
        let encoded = codec.encode(&v).unwrap();
        assert_eq!(encoded, b"Object:#<Object:0x240798>");
    }

    #[test]
    fn test_decode_unknown_tag_preserves_by_default() {
        let codec = TagCodec::new();
        let decoded = codec.decode(b"Object:#<Object:0x240798>").unwrap();
        assert_eq!(decoded, TypedValue::opaque("Object", b"#<Object:0x240798>".to_vec()));
    }

    #[test]
    fn test_opaque_roundtrip_is_coincidentally_stable() {
        // UTF-8 payloads survive; that is the extent of the guarantee
        let codec = TagCodec::new();
        let v = TypedValue::opaque("Widget", b"w-17".to_vec());
        assert_eq!(roundtrip(&codec, v.clone()), v);
    }

    #[test]
    fn test_decode_unknown_tag_fails_when_strict() {
        let codec = TagCodec::strict();
        let err = codec.decode(b"Object:whatever").unwrap_err();
        assert!(matches!(err, CodecError::UnknownTag(tag) if tag == "Object"));
    }

    // ========== Malformed entries ==========

    #[test]
    fn test_decode_missing_separator() {
        let codec = TagCodec::new();
        assert_eq!(codec.decode(b"no separator here").unwrap_err(), CodecError::MissingSeparator);
    }

    #[test]
    fn test_decode_bad_integer_payload() {
        let codec = TagCodec::new();
        let err = codec.decode(b"Integer:twelve").unwrap_err();
        assert!(matches!(err, CodecError::InvalidPayload { tag, .. } if tag == "Integer"));
    }

    #[test]
    fn test_decode_bad_float_payload() {
        let codec = TagCodec::new();
        assert!(codec.decode(b"Float:1.2.3").is_err());
    }

    #[test]
    fn test_decode_non_utf8_tag() {
        let codec = TagCodec::new();
        assert_eq!(codec.decode(&[0xFF, 0xFE, b':', b'x']).unwrap_err(), CodecError::Malformed);
    }

    #[test]
    fn test_decode_non_utf8_builtin_payload() {
        let codec = TagCodec::new();
        let mut entry = b"String:".to_vec();
        entry.extend_from_slice(&[0xFF, 0xFE]);
        assert_eq!(codec.decode(&entry).unwrap_err(), CodecError::Malformed);
    }

    #[test]
    fn test_decode_non_utf8_unknown_payload_preserved_raw() {
        // Unknown tags keep their payload as raw bytes, so UTF-8 is not required
        let codec = TagCodec::new();
        let mut entry = b"Blob:".to_vec();
        entry.extend_from_slice(&[0xFF, 0xFE]);
        let decoded = codec.decode(&entry).unwrap();
        assert_eq!(decoded, TypedValue::opaque("Blob", vec![0xFF, 0xFE]));
    }

    #[test]
    fn test_codec_id() {
        assert_eq!(TagCodec::new().codec_id(), "tag-v1");
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TagCodec>();
    }
}
