//! Central registry: named dialects, record descriptors, and the
//! conversion engine.
//!
//! [`Registry`] owns every defined [`Dialect`] and every registered
//! [`RecordDescriptor`], both keyed by name and immutable once stored.
//! Conversion runs through four entry points:
//!
//! - [`to_mapping`](Registry::to_mapping) / [`from_mapping`](Registry::from_mapping)
//!   convert with no dialect argument; every codec was resolved at
//!   registration, so this path performs no dialect lookups.
//! - [`to_mapping_with`](Registry::to_mapping_with) /
//!   [`from_mapping_with`](Registry::from_mapping_with) accept a
//!   [`DialectArg`]. They are only valid for record types registered with
//!   `dialect_support`; calling them for any other record is a call-shape
//!   error regardless of the argument's value.
//!
//! An explicit dialect is dynamically scoped: it follows the recursion
//! into every nested record that opted into dialect support and is
//! dropped for subtrees that did not. A record's own default dialect is
//! lexically scoped: it covers that record's direct fields only and is
//! never inherited by nested records.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::descriptor::{Plan, RecordDescriptor};
use crate::dialect::{Dialect, DialectArg};
use crate::error::{ConvertError, SchemaError};
use crate::resolve::ResolveCtx;
use crate::schema::{FieldValue, RecordSchema, RecordValue};
use crate::value::Value;

/// Registry of dialects and record types, shared across conversion callers.
///
/// All stored data is immutable after insertion; the interior locks guard
/// the maps only and are never held across conversion work.
#[derive(Default)]
pub struct Registry {
    dialects: RwLock<HashMap<String, Arc<Dialect>>>,
    records: RwLock<HashMap<String, Arc<RecordDescriptor>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Registration ----

    /// Define a dialect, making its name a valid dialect reference.
    pub fn define_dialect(&self, dialect: Dialect) -> Result<Arc<Dialect>, SchemaError> {
        let mut dialects = self.dialects.write();
        if dialects.contains_key(dialect.name()) {
            return Err(SchemaError::DuplicateDialect {
                name: dialect.name().to_owned(),
            });
        }
        let dialect = Arc::new(dialect);
        dialects.insert(dialect.name().to_owned(), Arc::clone(&dialect));
        log::debug!("defined dialect '{}'", dialect.name());
        Ok(dialect)
    }

    /// Look up a defined dialect by name.
    pub fn dialect(&self, name: &str) -> Option<Arc<Dialect>> {
        self.dialects.read().get(name).cloned()
    }

    /// Register a record type, building its descriptor.
    ///
    /// The schema's default-dialect reference is validated here, before
    /// any instance is ever converted; an unknown name fails with
    /// [`SchemaError::BadDialect`]. Registering a schema identical to an
    /// already-registered one returns the memoized descriptor; a
    /// conflicting schema under the same name is rejected.
    pub fn register(&self, schema: RecordSchema) -> Result<Arc<RecordDescriptor>, SchemaError> {
        let default_dialect = match schema.default_dialect() {
            Some(name) => Some(self.dialect(name).ok_or_else(|| SchemaError::BadDialect {
                name: name.to_owned(),
            })?),
            None => None,
        };
        let mut records = self.records.write();
        if let Some(existing) = records.get(schema.name()) {
            if existing.schema() == &schema {
                return Ok(Arc::clone(existing));
            }
            return Err(SchemaError::DuplicateRecord {
                record: schema.name().to_owned(),
            });
        }
        let name = schema.name().to_owned();
        let descriptor = Arc::new(RecordDescriptor::build(schema, default_dialect, &records)?);
        records.insert(name.clone(), Arc::clone(&descriptor));
        log::debug!(
            "registered record type '{}' ({} fields)",
            name,
            descriptor.fields.len()
        );
        Ok(descriptor)
    }

    /// Look up a registered record descriptor by name.
    pub fn descriptor(&self, record: &str) -> Option<Arc<RecordDescriptor>> {
        self.records.read().get(record).cloned()
    }

    // ---- Conversion entry points ----

    /// Convert a record instance to a wire mapping.
    ///
    /// Resolution uses the record's own default dialect where configured,
    /// else the builtin table; both were baked in at registration.
    pub fn to_mapping(&self, value: &RecordValue) -> Result<Value, ConvertError> {
        let desc = self.lookup_descriptor(value.record())?;
        self.serialize_record(&desc, value, ResolveCtx::none())
    }

    /// Convert a record instance to a wire mapping with a dialect argument.
    ///
    /// Only valid for record types registered with dialect support;
    /// otherwise fails with [`ConvertError::DialectNotSupported`] whatever
    /// the argument. [`DialectArg::Unset`] yields the same result as
    /// [`to_mapping`](Registry::to_mapping).
    pub fn to_mapping_with(
        &self,
        value: &RecordValue,
        dialect: DialectArg<'_>,
    ) -> Result<Value, ConvertError> {
        let desc = self.lookup_descriptor(value.record())?;
        let explicit = self.call_dialect(&desc, dialect)?;
        self.serialize_record(&desc, value, ctx_for(explicit.as_deref()))
    }

    /// Convert a wire mapping back into an instance of the named record type.
    pub fn from_mapping(&self, record: &str, mapping: &Value) -> Result<RecordValue, ConvertError> {
        let desc = self.lookup_descriptor(record)?;
        self.deserialize_record(&desc, mapping, ResolveCtx::none())
    }

    /// Convert a wire mapping back into a record instance with a dialect
    /// argument. Same call-shape rules as
    /// [`to_mapping_with`](Registry::to_mapping_with).
    pub fn from_mapping_with(
        &self,
        record: &str,
        mapping: &Value,
        dialect: DialectArg<'_>,
    ) -> Result<RecordValue, ConvertError> {
        let desc = self.lookup_descriptor(record)?;
        let explicit = self.call_dialect(&desc, dialect)?;
        self.deserialize_record(&desc, mapping, ctx_for(explicit.as_deref()))
    }

    // ---- Internals ----

    fn lookup_descriptor(&self, record: &str) -> Result<Arc<RecordDescriptor>, ConvertError> {
        self.descriptor(record)
            .ok_or_else(|| ConvertError::UnknownRecord {
                record: record.to_owned(),
            })
    }

    /// Validate the call shape and the dialect reference at call entry.
    fn call_dialect(
        &self,
        desc: &RecordDescriptor,
        arg: DialectArg<'_>,
    ) -> Result<Option<Arc<Dialect>>, ConvertError> {
        if !desc.dialect_support() {
            return Err(ConvertError::DialectNotSupported {
                record: desc.name().to_owned(),
            });
        }
        match arg {
            DialectArg::Unset => Ok(None),
            DialectArg::Named(name) => {
                self.dialect(name)
                    .map(Some)
                    .ok_or_else(|| ConvertError::BadDialect {
                        name: name.to_owned(),
                    })
            }
        }
    }

    fn serialize_record(
        &self,
        desc: &RecordDescriptor,
        value: &RecordValue,
        ctx: ResolveCtx<'_>,
    ) -> Result<Value, ConvertError> {
        let mut entries = Vec::with_capacity(desc.fields.len());
        for field in &desc.fields {
            let field_value =
                value
                    .get(&field.name)
                    .ok_or_else(|| ConvertError::MissingField {
                        field: field.name.clone(),
                        record: desc.name().to_owned(),
                    })?;
            let wire = self.serialize_plan(&field.plan, field_value, ctx, &field.name)?;
            entries.push((field.name.clone(), wire));
        }
        Ok(Value::Map(entries))
    }

    fn serialize_plan(
        &self,
        plan: &Plan,
        value: &FieldValue,
        ctx: ResolveCtx<'_>,
        field: &str,
    ) -> Result<Value, ConvertError> {
        match plan {
            Plan::Scalar { ty, baked } => {
                // `baked` already encodes default-then-builtin; only the
                // explicit dialect is consulted per call.
                let codec = ctx
                    .explicit_dialect()
                    .and_then(|d| d.lookup(ty))
                    .unwrap_or(baked);
                codec
                    .serialize(value)
                    .map_err(|e| ConvertError::Codec {
                        field: field.to_owned(),
                        message: e.to_string(),
                    })
            }
            Plan::Nested { record } => {
                let FieldValue::Record(inner) = value else {
                    return Err(ConvertError::TypeMismatch {
                        field: field.to_owned(),
                        expected: format!("record '{record}'"),
                        found: format!("{value:?}"),
                    });
                };
                if inner.record() != record {
                    return Err(ConvertError::TypeMismatch {
                        field: field.to_owned(),
                        expected: format!("record '{record}'"),
                        found: format!("record '{}'", inner.record()),
                    });
                }
                let desc = self.lookup_descriptor(record)?;
                self.serialize_record(&desc, inner, ctx.for_nested(desc.dialect_support()))
            }
            Plan::List(elem) => {
                let FieldValue::List(items) = value else {
                    return Err(ConvertError::TypeMismatch {
                        field: field.to_owned(),
                        expected: "list".to_owned(),
                        found: format!("{value:?}"),
                    });
                };
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.serialize_plan(elem, item, ctx, field)?);
                }
                Ok(Value::List(out))
            }
        }
    }

    fn deserialize_record(
        &self,
        desc: &RecordDescriptor,
        mapping: &Value,
        ctx: ResolveCtx<'_>,
    ) -> Result<RecordValue, ConvertError> {
        if !matches!(mapping, Value::Map(_)) {
            return Err(ConvertError::Format(format!(
                "expected map for record '{}'",
                desc.name()
            )));
        }
        let mut out = RecordValue::new(desc.name());
        for field in &desc.fields {
            let wire = mapping
                .get(&field.name)
                .ok_or_else(|| ConvertError::MissingField {
                    field: field.name.clone(),
                    record: desc.name().to_owned(),
                })?;
            let field_value = self.deserialize_plan(&field.plan, wire, ctx, &field.name)?;
            out.set(field.name.clone(), field_value);
        }
        Ok(out)
    }

    fn deserialize_plan(
        &self,
        plan: &Plan,
        wire: &Value,
        ctx: ResolveCtx<'_>,
        field: &str,
    ) -> Result<FieldValue, ConvertError> {
        match plan {
            Plan::Scalar { ty, baked } => {
                let codec = ctx
                    .explicit_dialect()
                    .and_then(|d| d.lookup(ty))
                    .unwrap_or(baked);
                codec
                    .deserialize(wire)
                    .map_err(|e| ConvertError::Codec {
                        field: field.to_owned(),
                        message: e.to_string(),
                    })
            }
            Plan::Nested { record } => {
                let desc = self.lookup_descriptor(record)?;
                let inner = self.deserialize_record(
                    &desc,
                    wire,
                    ctx.for_nested(desc.dialect_support()),
                )?;
                Ok(FieldValue::Record(inner))
            }
            Plan::List(elem) => {
                let Value::List(items) = wire else {
                    return Err(ConvertError::TypeMismatch {
                        field: field.to_owned(),
                        expected: "list".to_owned(),
                        found: format!("{wire:?}"),
                    });
                };
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.deserialize_plan(elem, item, ctx, field)?);
                }
                Ok(FieldValue::List(out))
            }
        }
    }
}

fn ctx_for(explicit: Option<&Dialect>) -> ResolveCtx<'_> {
    match explicit {
        Some(dialect) => ResolveCtx::explicit(dialect),
        None => ResolveCtx::none(),
    }
}
