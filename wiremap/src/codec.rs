//! Codec pairs and the builtin codec table.
//!
//! A [`Codec`] is an immutable serialize/deserialize pair bound to exactly
//! one declared [`FieldType`]. The [`builtin`] table provides the library
//! default codec for every scalar type; it is the final fallback of the
//! resolution chain and is always consulted last.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::schema::{FieldType, FieldValue};
use crate::value::Value;

/// Error produced by a codec rejecting a value.
#[derive(Debug)]
pub struct CodecError(pub String);

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CodecError {}

type SerializeFn = dyn Fn(&FieldValue) -> Result<Value, CodecError> + Send + Sync;
type DeserializeFn = dyn Fn(&Value) -> Result<FieldValue, CodecError> + Send + Sync;

/// An immutable serialize/deserialize pair bound to one declared type.
///
/// Cloning is cheap (the function pair is `Arc`-shared).
#[derive(Clone)]
pub struct Codec {
    ty: FieldType,
    serialize: Arc<SerializeFn>,
    deserialize: Arc<DeserializeFn>,
}

impl Codec {
    /// Construct a codec from a raw serialize/deserialize function pair.
    pub fn new<S, D>(ty: FieldType, serialize: S, deserialize: D) -> Self
    where
        S: Fn(&FieldValue) -> Result<Value, CodecError> + Send + Sync + 'static,
        D: Fn(&Value) -> Result<FieldValue, CodecError> + Send + Sync + 'static,
    {
        Self {
            ty,
            serialize: Arc::new(serialize),
            deserialize: Arc::new(deserialize),
        }
    }

    /// The declared type this codec is bound to.
    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    /// Convert a field value into its wire representation.
    pub fn serialize(&self, value: &FieldValue) -> Result<Value, CodecError> {
        (self.serialize)(value)
    }

    /// Convert a wire value back into a field value.
    pub fn deserialize(&self, value: &Value) -> Result<FieldValue, CodecError> {
        (self.deserialize)(value)
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codec({})", self.ty)
    }
}

fn mismatch(expected: &str, found: &impl fmt::Debug) -> CodecError {
    CodecError(format!("expected {expected}, found {found:?}"))
}

/// Builtin default codec for a declared type.
///
/// Returns `None` for `Record` and `List` types: those are handled by
/// engine recursion, not by a codec. Scalar types always resolve.
pub fn builtin(ty: &FieldType) -> Option<Codec> {
    let codec = match ty {
        FieldType::Bool => Codec::new(
            FieldType::Bool,
            |v| match v {
                FieldValue::Bool(b) => Ok(Value::Bool(*b)),
                other => Err(mismatch("bool", other)),
            },
            |v| match v {
                Value::Bool(b) => Ok(FieldValue::Bool(*b)),
                other => Err(mismatch("bool", other)),
            },
        ),
        FieldType::Int => Codec::new(
            FieldType::Int,
            |v| match v {
                FieldValue::Int(i) => Ok(Value::I64(*i)),
                other => Err(mismatch("int", other)),
            },
            |v| match v {
                Value::I64(i) => Ok(FieldValue::Int(*i)),
                Value::U64(u) => i64::try_from(*u)
                    .map(FieldValue::Int)
                    .map_err(|_| CodecError(format!("integer {u} out of range"))),
                other => Err(mismatch("integer", other)),
            },
        ),
        FieldType::Float => Codec::new(
            FieldType::Float,
            |v| match v {
                FieldValue::Float(x) => Ok(Value::F64(*x)),
                other => Err(mismatch("float", other)),
            },
            |v| match v {
                Value::F64(x) => Ok(FieldValue::Float(*x)),
                Value::F32(x) => Ok(FieldValue::Float(f64::from(*x))),
                Value::I64(i) => Ok(FieldValue::Float(*i as f64)),
                Value::U64(u) => Ok(FieldValue::Float(*u as f64)),
                other => Err(mismatch("number", other)),
            },
        ),
        FieldType::Str => Codec::new(
            FieldType::Str,
            |v| match v {
                FieldValue::Str(s) => Ok(Value::String(s.clone())),
                other => Err(mismatch("str", other)),
            },
            |v| match v {
                Value::String(s) => Ok(FieldValue::Str(s.clone())),
                other => Err(mismatch("string", other)),
            },
        ),
        FieldType::Bytes => Codec::new(
            FieldType::Bytes,
            |v| match v {
                FieldValue::Bytes(b) => Ok(Value::Bytes(b.clone())),
                other => Err(mismatch("bytes", other)),
            },
            |v| match v {
                Value::Bytes(b) => Ok(FieldValue::Bytes(b.clone())),
                other => Err(mismatch("bytes", other)),
            },
        ),
        // ISO-8601 calendar date string.
        FieldType::Date => Codec::new(
            FieldType::Date,
            |v| match v {
                FieldValue::Date(d) => Ok(Value::String(d.format("%Y-%m-%d").to_string())),
                other => Err(mismatch("date", other)),
            },
            |v| match v {
                Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(FieldValue::Date)
                    .map_err(|e| CodecError(format!("invalid date '{s}': {e}"))),
                other => Err(mismatch("date string", other)),
            },
        ),
        FieldType::Record(_) | FieldType::List(_) => return None,
    };
    Some(codec)
}
