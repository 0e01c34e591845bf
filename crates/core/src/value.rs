//! Typed values stored through the encoding layer.
//!
//! This module defines:
//! - TypedValue: closed tagged union over the supported semantic types
//! - Coercion to a declared target kind (used by key constraints)
//!
//! ## Value Model
//!
//! The enum has exactly five variants. Four of them (`Text`, `Int`, `Float`,
//! `Symbol`) are the built-in kinds with registered converters; `Opaque`
//! carries the raw payload and origin-type descriptor of anything the
//! tag-based encoding cannot classify.
//!
//! ### Equality Rules
//!
//! - Different variants are NEVER equal: `Int(1) != Float(1.0)`
//! - `Symbol("x") != Text("x")` - a symbol is not its spelling
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tag::TypeTag;

/// Canonical value type for everything passing through the typed store.
///
/// Values of the four built-in kinds round-trip exactly through either
/// codec. `Opaque` values round-trip exactly through the opaque codec and
/// only coincidentally (payload happens to be valid UTF-8) through the
/// tag-based one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypedValue {
    /// UTF-8 text
    Text(String),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// Symbolic atom, identified by its name
    Symbol(String),
    /// A value with no registered converter: raw payload plus the
    /// descriptor of the type it came from
    Opaque {
        /// Origin-type descriptor, used as the wire tag
        type_name: String,
        /// Raw payload bytes
        bytes: Vec<u8>,
    },
}

// Different variants are never equal; floats keep IEEE-754 semantics.
impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypedValue::Text(a), TypedValue::Text(b)) => a == b,
            (TypedValue::Int(a), TypedValue::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (TypedValue::Float(a), TypedValue::Float(b)) => a == b,
            (TypedValue::Symbol(a), TypedValue::Symbol(b)) => a == b,
            (
                TypedValue::Opaque { type_name: ta, bytes: ba },
                TypedValue::Opaque { type_name: tb, bytes: bb },
            ) => ta == tb && ba == bb,
            _ => false,
        }
    }
}

impl TypedValue {
    /// Build an opaque value from an origin-type descriptor and raw payload.
    pub fn opaque(type_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        TypedValue::Opaque {
            type_name: type_name.into(),
            bytes: bytes.into(),
        }
    }

    /// The wire tag for this value.
    ///
    /// Built-in kinds report their registered tag name; opaque values
    /// report their origin-type descriptor.
    pub fn type_name(&self) -> &str {
        match self {
            TypedValue::Text(_) => TypeTag::Text.wire_name(),
            TypedValue::Int(_) => TypeTag::Int.wire_name(),
            TypedValue::Float(_) => TypeTag::Float.wire_name(),
            TypedValue::Symbol(_) => TypeTag::Symbol.wire_name(),
            TypedValue::Opaque { type_name, .. } => type_name,
        }
    }

    /// The built-in kind of this value, if it has one.
    pub fn tag(&self) -> Option<TypeTag> {
        match self {
            TypedValue::Text(_) => Some(TypeTag::Text),
            TypedValue::Int(_) => Some(TypeTag::Int),
            TypedValue::Float(_) => Some(TypeTag::Float),
            TypedValue::Symbol(_) => Some(TypeTag::Symbol),
            TypedValue::Opaque { .. } => None,
        }
    }

    /// Default textual rendering of the value.
    ///
    /// This is the payload written by the tag-based codec and the result of
    /// coercing any value to `Text` or `Symbol`. Opaque payloads render
    /// lossily through UTF-8 replacement.
    pub fn render(&self) -> String {
        match self {
            TypedValue::Text(s) => s.clone(),
            TypedValue::Int(i) => i.to_string(),
            TypedValue::Float(f) => f.to_string(),
            TypedValue::Symbol(s) => s.clone(),
            TypedValue::Opaque { bytes, .. } => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Get as &str if this is a Text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the symbol name if this is a Symbol value
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            TypedValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this value has no registered converter
    pub fn is_opaque(&self) -> bool {
        matches!(self, TypedValue::Opaque { .. })
    }

    /// Convert this value to the declared target kind.
    ///
    /// Implements the per-type conversion functions applied by key
    /// constraints before a write:
    ///
    /// - `Text` and `Symbol` targets take the value's textual rendering and
    ///   always succeed
    /// - `Int` truncates floats toward zero and parses text/symbol names
    /// - `Float` widens integers and parses text/symbol names
    ///
    /// A conversion with no sensible result (non-numeric text constrained
    /// to `Int`, an opaque payload constrained to a numeric kind, a float
    /// outside the integer range) fails with [`Error::Coercion`] rather
    /// than storing a corrupted value.
    pub fn coerce(&self, target: TypeTag) -> Result<TypedValue> {
        let fail = |reason: String| Error::Coercion {
            from: self.type_name().to_string(),
            target,
            reason,
        };

        match target {
            TypeTag::Text => Ok(TypedValue::Text(self.render())),
            TypeTag::Symbol => Ok(TypedValue::Symbol(self.render())),
            TypeTag::Int => match self {
                TypedValue::Int(i) => Ok(TypedValue::Int(*i)),
                TypedValue::Float(f) => {
                    // Truncation toward zero; saturating casts would hide
                    // out-of-range inputs, so reject them instead.
                    if f.is_finite() && (i64::MIN as f64..=i64::MAX as f64).contains(f) {
                        Ok(TypedValue::Int(*f as i64))
                    } else {
                        Err(fail(format!("float {f} has no integer form")))
                    }
                }
                TypedValue::Text(s) | TypedValue::Symbol(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(TypedValue::Int)
                    .map_err(|e| fail(e.to_string())),
                TypedValue::Opaque { .. } => Err(fail("opaque payload has no integer form".into())),
            },
            TypeTag::Float => match self {
                TypedValue::Float(f) => Ok(TypedValue::Float(*f)),
                TypedValue::Int(i) => Ok(TypedValue::Float(*i as f64)),
                TypedValue::Text(s) | TypedValue::Symbol(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(TypedValue::Float)
                    .map_err(|e| fail(e.to_string())),
                TypedValue::Opaque { .. } => Err(fail("opaque payload has no float form".into())),
            },
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::Text(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::Text(s)
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        TypedValue::Int(i)
    }
}

impl From<i32> for TypedValue {
    fn from(i: i32) -> Self {
        TypedValue::Int(i as i64)
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        TypedValue::Float(f)
    }
}

impl From<f32> for TypedValue {
    fn from(f: f32) -> Self {
        TypedValue::Float(f as f64)
    }
}

/// Shorthand for building a `Symbol` value.
pub fn sym(name: impl Into<String>) -> TypedValue {
    TypedValue::Symbol(name.into())
}

// ============================================================================
// serde_json interop for configuration and test ergonomics
// ============================================================================

impl From<serde_json::Value> for TypedValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => TypedValue::Text(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TypedValue::Int(i)
                } else {
                    TypedValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            // JSON has no symbol/opaque kinds; everything else keeps its
            // JSON rendering as text.
            other => TypedValue::Text(other.to_string()),
        }
    }
}

impl From<&TypedValue> for serde_json::Value {
    fn from(v: &TypedValue) -> Self {
        match v {
            TypedValue::Text(s) => serde_json::Value::String(s.clone()),
            TypedValue::Int(i) => serde_json::Value::Number((*i).into()),
            TypedValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TypedValue::Symbol(s) => serde_json::Value::String(s.clone()),
            TypedValue::Opaque { bytes, .. } => {
                serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}
