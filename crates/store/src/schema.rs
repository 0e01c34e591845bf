//! Schema: template-level key constraints.
//!
//! A `Schema` is the explicit replacement for declaring constraints "on
//! the class": an immutable-after-handoff list of `(key, target kind)`
//! declarations that every store constructed from it copies into its own
//! registry. Instances own their copies; editing a schema after a store
//! was built from it never reaches that store (snapshot, not live
//! reference).

use serde::{Deserialize, Serialize};

use tagdb_core::{Result, TypeTag, TypedValue};

/// Template of key constraints applied to every store built from it.
///
/// Serde-enabled so deployments can declare schemas in configuration:
///
/// ```
/// use tagdb_store::Schema;
///
/// let schema: Schema = serde_json::from_str(
///     r#"{ "constraints": [[{"Text": "year"}, "Integer"]] }"#,
/// ).unwrap();
/// assert_eq!(schema.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    constraints: Vec<(TypedValue, TypeTag)>,
}

impl Schema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that values written under `key` are coerced to `target`.
    ///
    /// The closed [`TypeTag`] enum makes an unconvertible target
    /// unrepresentable here; use [`Schema::constrain_key_named`] when the
    /// target arrives as text.
    pub fn constrain_key(&mut self, key: impl Into<TypedValue>, target: TypeTag) -> &mut Self {
        self.constraints.push((key.into(), target));
        self
    }

    /// Declare a constraint with the target kind given by wire name.
    ///
    /// This is the path configuration files come through. A name with no
    /// registered converter (`"Object"`, `"Array"`, ...) is a
    /// configuration error, rejected here rather than at write time.
    pub fn constrain_key_named(
        &mut self,
        key: impl Into<TypedValue>,
        target: &str,
    ) -> Result<&mut Self> {
        let target: TypeTag = target.parse()?;
        Ok(self.constrain_key(key, target))
    }

    /// The declared constraints, in declaration order.
    pub fn constraints(&self) -> impl Iterator<Item = (&TypedValue, TypeTag)> {
        self.constraints.iter().map(|(k, t)| (k, *t))
    }

    /// Number of declared constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether no constraints are declared.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
