//! Dialect definition: named, immutable bundles of per-type codec overrides.
//!
//! A [`Dialect`] can only be produced through [`Dialect::builder`], and
//! registries only hand out dialects that went through
//! [`Registry::define_dialect`](crate::Registry::define_dialect). A dialect
//! *reference* (the name supplied as a record's default or as a call-site
//! override) is validated against the registry; a name that was never
//! defined fails with a bad-dialect error.

use std::collections::HashMap;

use crate::codec::Codec;
use crate::schema::FieldType;

/// A named, immutable mapping from declared type to codec.
///
/// Partial coverage is legal and expected: a type without an entry falls
/// through to the next step of the resolution chain.
#[derive(Debug)]
pub struct Dialect {
    name: String,
    codecs: HashMap<FieldType, Codec>,
}

impl Dialect {
    /// Start defining a dialect.
    pub fn builder(name: impl Into<String>) -> DialectBuilder {
        DialectBuilder {
            name: name.into(),
            codecs: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the codec for a declared type, if this dialect covers it.
    pub fn lookup(&self, ty: &FieldType) -> Option<&Codec> {
        self.codecs.get(ty)
    }
}

/// Builder returned by [`Dialect::builder`].
pub struct DialectBuilder {
    name: String,
    codecs: HashMap<FieldType, Codec>,
}

impl DialectBuilder {
    /// Add a codec, keyed by the declared type it is bound to.
    ///
    /// A later codec for the same type replaces the earlier one.
    pub fn with(mut self, codec: Codec) -> Self {
        self.codecs.insert(codec.ty().clone(), codec);
        self
    }

    pub fn build(self) -> Dialect {
        Dialect {
            name: self.name,
            codecs: self.codecs,
        }
    }
}

/// Dialect argument accepted by the `_with` conversion entry points.
///
/// Distinguishes "explicitly passed as unset" from "passed by name".
/// `Unset` behaves exactly like calling the plain entry point: the
/// record's own default dialect (or the builtin table) applies. Omitting
/// the argument entirely means using the plain entry point instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialectArg<'a> {
    /// No override; behave as if the argument was never passed.
    #[default]
    Unset,
    /// Override with the dialect registered under this name.
    Named(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::builtin;
    use crate::schema::FieldValue;
    use crate::value::Value;

    #[test]
    fn lookup_misses_uncovered_types() {
        let dialect = Dialect::builder("ints-only")
            .with(builtin(&FieldType::Int).unwrap())
            .build();
        assert!(dialect.lookup(&FieldType::Int).is_some());
        assert!(dialect.lookup(&FieldType::Date).is_none());
        assert_eq!(dialect.name(), "ints-only");
    }

    #[test]
    fn later_codec_replaces_earlier() {
        let dialect = Dialect::builder("d")
            .with(builtin(&FieldType::Int).unwrap())
            .with(Codec::new(
                FieldType::Int,
                |_| Ok(Value::Null),
                |_| Ok(FieldValue::Int(0)),
            ))
            .build();
        let codec = dialect.lookup(&FieldType::Int).unwrap();
        assert_eq!(codec.serialize(&FieldValue::Int(5)).unwrap(), Value::Null);
    }
}
