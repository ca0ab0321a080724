//! Per-record-type descriptors with pre-resolved field plans.
//!
//! A [`RecordDescriptor`] is built exactly once per record type, at
//! registration, and never mutated afterwards. Building validates the
//! configured default dialect and every nested-record reference up front,
//! then bakes each scalar field's no-override codec (default dialect,
//! else builtin) into the field plan. The plain conversion path runs
//! entirely on baked codecs; only the override path performs a per-call
//! dialect lookup, layered on top of the baked fallback.

use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::Codec;
use crate::dialect::Dialect;
use crate::error::SchemaError;
use crate::resolve::{resolve, ResolveCtx};
use crate::schema::{FieldType, RecordSchema};

/// Conversion plan for one declared field type.
#[derive(Debug)]
pub(crate) enum Plan {
    /// Convert with a codec. `baked` is the no-override resolution
    /// (own default dialect, else builtin), fixed at registration.
    Scalar { ty: FieldType, baked: Codec },
    /// Recurse into a nested record's own descriptor.
    Nested { record: String },
    /// Convert element-wise, in order.
    List(Box<Plan>),
}

#[derive(Debug)]
pub(crate) struct FieldPlan {
    pub(crate) name: String,
    pub(crate) plan: Plan,
}

/// Immutable per-record-type conversion metadata.
#[derive(Debug)]
pub struct RecordDescriptor {
    schema: RecordSchema,
    default_dialect: Option<Arc<Dialect>>,
    pub(crate) fields: Vec<FieldPlan>,
}

impl RecordDescriptor {
    /// Build a descriptor from a validated schema.
    ///
    /// `default_dialect` must already be resolved from the schema's
    /// dialect reference; the registry raises a bad-dialect error before
    /// calling this. Nested-record references are checked against the
    /// currently registered descriptors so that a dangling reference
    /// fails at registration, not at first conversion.
    pub(crate) fn build(
        schema: RecordSchema,
        default_dialect: Option<Arc<Dialect>>,
        records: &HashMap<String, Arc<RecordDescriptor>>,
    ) -> Result<Self, SchemaError> {
        let mut fields = Vec::new();
        for (name, ty) in schema.fields() {
            let plan = compile(ty, default_dialect.as_deref(), records)?;
            fields.push(FieldPlan {
                name: name.to_owned(),
                plan,
            });
        }
        Ok(Self {
            schema,
            default_dialect,
            fields,
        })
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Whether this record's entry points accept a runtime dialect argument.
    pub fn dialect_support(&self) -> bool {
        self.schema.dialect_support()
    }

    /// The resolved default dialect, if one is configured.
    pub fn default_dialect(&self) -> Option<&Dialect> {
        self.default_dialect.as_deref()
    }

    /// The schema this descriptor was built from.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }
}

fn compile(
    ty: &FieldType,
    default: Option<&Dialect>,
    records: &HashMap<String, Arc<RecordDescriptor>>,
) -> Result<Plan, SchemaError> {
    match ty {
        FieldType::Record(name) => {
            if !records.contains_key(name) {
                return Err(SchemaError::UnknownRecord {
                    record: name.clone(),
                });
            }
            Ok(Plan::Nested {
                record: name.clone(),
            })
        }
        FieldType::List(elem) => Ok(Plan::List(Box::new(compile(elem, default, records)?))),
        scalar => {
            let baked = resolve(scalar, ResolveCtx::none(), default)
                .ok_or_else(|| SchemaError::UnsupportedType { ty: scalar.clone() })?;
            Ok(Plan::Scalar {
                ty: scalar.clone(),
                baked,
            })
        }
    }
}
