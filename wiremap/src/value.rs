//! Format-agnostic wire value representation.
//!
//! The [`Value`] enum is the in-memory key/value structure produced by
//! `to_mapping` and consumed by `from_mapping`. Map entries keep field
//! declaration order, so an external encoder sees fields in the same
//! order the record declares them.

use serde::{Deserialize, Serialize};

/// Format-agnostic value representation for converted record fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// Ordered key/value entries. Keys are field names; insertion order
    /// is field declaration order.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Look up a map entry by key. Returns `None` for non-map values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}
