//! Type tags for the tag-based wire format and key constraints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The built-in, always-convertible kinds.
///
/// These are the only kinds a key may be constrained to, and the only tags
/// the tag-based codec dispatches on. Anything outside this set travels as
/// [`TypedValue::Opaque`](crate::TypedValue::Opaque), whose origin-type
/// descriptor is an arbitrary string rather than an enum member - a fifth
/// kind cannot slip through an exhaustive match untagged.
///
/// Serde names match the wire names, so schemas written in configuration
/// files use `"String"`, `"Integer"` (or the legacy `"Fixnum"`), `"Float"`
/// and `"Symbol"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// UTF-8 text
    #[serde(rename = "String")]
    Text,
    /// 64-bit signed integer
    #[serde(rename = "Integer", alias = "Fixnum")]
    Int,
    /// 64-bit floating point
    Float,
    /// Symbolic atom
    Symbol,
}

impl TypeTag {
    /// All built-in kinds, in wire-format order.
    pub const ALL: [TypeTag; 4] = [TypeTag::Text, TypeTag::Int, TypeTag::Float, TypeTag::Symbol];

    /// The tag string written before the `:` separator.
    pub fn wire_name(&self) -> &'static str {
        match self {
            TypeTag::Text => "String",
            TypeTag::Int => "Integer",
            TypeTag::Float => "Float",
            TypeTag::Symbol => "Symbol",
        }
    }

    /// Resolve a wire tag to its kind.
    ///
    /// `"Fixnum"` is accepted as a legacy alias for `"Integer"` so data
    /// written by older deployments keeps decoding. Returns `None` for
    /// tags with no registered converter.
    pub fn from_wire(tag: &str) -> Option<TypeTag> {
        match tag {
            "String" => Some(TypeTag::Text),
            "Integer" | "Fixnum" => Some(TypeTag::Int),
            "Float" => Some(TypeTag::Float),
            "Symbol" => Some(TypeTag::Symbol),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    /// Parse a constraint target by name.
    ///
    /// Unlike [`TypeTag::from_wire`], an unrecognized name is a
    /// configuration error: constraining a key to a kind with no converter
    /// is rejected rather than deferred to write time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::from_wire(s).ok_or_else(|| Error::UnsupportedConstraint(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(TypeTag::Text.wire_name(), "String");
        assert_eq!(TypeTag::Int.wire_name(), "Integer");
        assert_eq!(TypeTag::Float.wire_name(), "Float");
        assert_eq!(TypeTag::Symbol.wire_name(), "Symbol");
    }

    #[test]
    fn test_from_wire_roundtrip() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_wire(tag.wire_name()), Some(tag));
        }
    }

    #[test]
    fn test_fixnum_alias() {
        assert_eq!(TypeTag::from_wire("Fixnum"), Some(TypeTag::Int));
    }

    #[test]
    fn test_from_wire_unknown() {
        assert_eq!(TypeTag::from_wire("Object"), None);
        assert_eq!(TypeTag::from_wire("string"), None); // case-sensitive
    }

    #[test]
    fn test_from_str_unsupported_is_config_error() {
        let err = "Object".parse::<TypeTag>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstraint(name) if name == "Object"));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&TypeTag::Int).unwrap();
        assert_eq!(json, "\"Integer\"");
        let tag: TypeTag = serde_json::from_str("\"Fixnum\"").unwrap();
        assert_eq!(tag, TypeTag::Int);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeTag::Symbol.to_string(), "Symbol");
    }
}
