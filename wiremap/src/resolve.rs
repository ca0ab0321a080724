//! Codec resolution: precedence between explicit, default, and builtin.
//!
//! [`resolve`] is the pure precedence function at the heart of dialect
//! handling. For a declared type it consults, in order:
//!
//! 1. the call-site explicit dialect carried by the [`ResolveCtx`],
//! 2. the record's own configured default dialect,
//! 3. the [`builtin`](crate::codec::builtin) codec table.
//!
//! A dialect that does not cover the type never fails the lookup; it
//! falls through silently to the next step. Whether an explicit dialect
//! reaches a record at all is decided where the context is constructed
//! (see [`ResolveCtx::for_nested`]): a record with `dialect_support`
//! disabled never observes one.

use crate::codec::{builtin, Codec};
use crate::dialect::Dialect;
use crate::schema::FieldType;

/// Ephemeral resolution context for one conversion call tree.
///
/// Holds the explicit call-site dialect, if any. Created fresh per
/// top-level call, read-only afterwards, and never shared across calls.
#[derive(Clone, Copy, Debug)]
pub struct ResolveCtx<'a> {
    explicit: Option<&'a Dialect>,
}

impl<'a> ResolveCtx<'a> {
    /// Context with no explicit override.
    pub fn none() -> Self {
        Self { explicit: None }
    }

    /// Context carrying an explicit call-site dialect.
    pub fn explicit(dialect: &'a Dialect) -> Self {
        Self {
            explicit: Some(dialect),
        }
    }

    /// The explicit dialect, if one is in effect for the current record.
    pub fn explicit_dialect(&self) -> Option<&'a Dialect> {
        self.explicit
    }

    /// Derive the context for a nested record.
    ///
    /// The explicit dialect is dynamically scoped: it propagates only
    /// into records that opted into runtime overrides. A nested record
    /// with `dialect_support` disabled gets a clean context and resolves
    /// from its own default dialect or the builtin table. The caller's
    /// *default* dialect is never inherited either way.
    pub fn for_nested(&self, dialect_support: bool) -> ResolveCtx<'a> {
        ResolveCtx {
            explicit: if dialect_support { self.explicit } else { None },
        }
    }
}

/// Resolve the codec for a declared type under the given context.
///
/// Returns `None` only for composite types (`Record`, `List`), which are
/// converted by engine recursion rather than a codec. For scalar types
/// the builtin table makes the chain total: some codec always resolves,
/// whatever the dialects cover.
pub fn resolve(ty: &FieldType, ctx: ResolveCtx<'_>, own_default: Option<&Dialect>) -> Option<Codec> {
    if let Some(dialect) = ctx.explicit_dialect() {
        if let Some(codec) = dialect.lookup(ty) {
            return Some(codec.clone());
        }
    }
    if let Some(dialect) = own_default {
        if let Some(codec) = dialect.lookup(ty) {
            return Some(codec.clone());
        }
    }
    builtin(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, CodecError};
    use crate::schema::FieldValue;
    use crate::value::Value;

    fn tagging_codec(ty: FieldType, tag: &'static str) -> Codec {
        Codec::new(
            ty,
            move |_| Ok(Value::String(tag.to_owned())),
            |_| Err(CodecError("serialize-only test codec".into())),
        )
    }

    fn serialized_tag(codec: &Codec) -> Value {
        codec.serialize(&FieldValue::Int(0)).unwrap()
    }

    #[test]
    fn explicit_wins_over_default() {
        let explicit = Dialect::builder("explicit")
            .with(tagging_codec(FieldType::Int, "explicit"))
            .build();
        let default = Dialect::builder("default")
            .with(tagging_codec(FieldType::Int, "default"))
            .build();
        let codec = resolve(
            &FieldType::Int,
            ResolveCtx::explicit(&explicit),
            Some(&default),
        )
        .unwrap();
        assert_eq!(serialized_tag(&codec), Value::String("explicit".into()));
    }

    #[test]
    fn default_applies_without_explicit() {
        let default = Dialect::builder("default")
            .with(tagging_codec(FieldType::Int, "default"))
            .build();
        let codec = resolve(&FieldType::Int, ResolveCtx::none(), Some(&default)).unwrap();
        assert_eq!(serialized_tag(&codec), Value::String("default".into()));
    }

    #[test]
    fn uncovered_type_falls_through_to_builtin() {
        // Neither dialect covers Int; resolution must not fail.
        let explicit = Dialect::builder("dates")
            .with(tagging_codec(FieldType::Date, "explicit"))
            .build();
        let default = Dialect::builder("dates-too")
            .with(tagging_codec(FieldType::Date, "default"))
            .build();
        let codec = resolve(
            &FieldType::Int,
            ResolveCtx::explicit(&explicit),
            Some(&default),
        )
        .unwrap();
        assert_eq!(
            codec.serialize(&FieldValue::Int(255)).unwrap(),
            Value::I64(255)
        );
    }

    #[test]
    fn partial_explicit_falls_through_to_default() {
        let explicit = Dialect::builder("dates")
            .with(tagging_codec(FieldType::Date, "explicit"))
            .build();
        let default = Dialect::builder("ints")
            .with(tagging_codec(FieldType::Int, "default"))
            .build();
        let codec = resolve(
            &FieldType::Int,
            ResolveCtx::explicit(&explicit),
            Some(&default),
        )
        .unwrap();
        assert_eq!(serialized_tag(&codec), Value::String("default".into()));
    }

    #[test]
    fn nested_context_drops_explicit_without_support() {
        let explicit = Dialect::builder("explicit")
            .with(tagging_codec(FieldType::Int, "explicit"))
            .build();
        let ctx = ResolveCtx::explicit(&explicit);
        assert!(ctx.for_nested(true).explicit_dialect().is_some());
        assert!(ctx.for_nested(false).explicit_dialect().is_none());
    }
}
