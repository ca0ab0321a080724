//! Declared field types, runtime field values, and record schemas.
//!
//! A [`RecordSchema`] is the deterministic registration step for a record
//! type: an ordered field table plus the per-type conversion configuration
//! (optional default dialect, dialect-support flag). Schemas are plain data;
//! [`Registry::register`](crate::Registry::register) turns them into
//! immutable [`RecordDescriptor`](crate::RecordDescriptor)s.

use chrono::NaiveDate;
use std::fmt;

/// Declared type of a record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    Date,
    /// A nested record type, referenced by its registered name.
    Record(String),
    /// An ordered sequence of the element type.
    List(Box<FieldType>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "str"),
            Self::Bytes => write!(f, "bytes"),
            Self::Date => write!(f, "date"),
            Self::Record(name) => write!(f, "record '{name}'"),
            Self::List(elem) => write!(f, "list<{elem}>"),
        }
    }
}

/// Runtime value of a record field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Record(RecordValue),
    List(Vec<FieldValue>),
}

/// A record instance: named fields in declaration order, tagged with the
/// registered record type name.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordValue {
    record: String,
    fields: Vec<(String, FieldValue)>,
}

impl RecordValue {
    /// Create an empty instance of the named record type.
    pub fn new(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field value, replacing an existing entry with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(entry) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Read a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The registered record type name this instance belongs to.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Iterate fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Declaration of a record type: ordered fields plus conversion configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSchema {
    name: String,
    fields: Vec<(String, FieldType)>,
    default_dialect: Option<String>,
    dialect_support: bool,
}

impl RecordSchema {
    /// Start declaring a record type.
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            schema: RecordSchema {
                name: name.into(),
                fields: Vec::new(),
                default_dialect: None,
                dialect_support: false,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Name of the configured default dialect, if any.
    pub fn default_dialect(&self) -> Option<&str> {
        self.default_dialect.as_deref()
    }

    /// Whether conversion entry points for this record accept a runtime
    /// dialect argument.
    pub fn dialect_support(&self) -> bool {
        self.dialect_support
    }
}

/// Builder returned by [`RecordSchema::builder`].
pub struct RecordSchemaBuilder {
    schema: RecordSchema,
}

impl RecordSchemaBuilder {
    /// Declare a field. Declaration order is preserved in mappings.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.schema.fields.push((name.into(), ty));
        self
    }

    /// Configure the record's default dialect by name.
    ///
    /// The reference is validated when the schema is registered, not here.
    pub fn default_dialect(mut self, name: impl Into<String>) -> Self {
        self.schema.default_dialect = Some(name.into());
        self
    }

    /// Opt this record type into runtime dialect overrides.
    pub fn dialect_support(mut self, enabled: bool) -> Self {
        self.schema.dialect_support = enabled;
        self
    }

    pub fn build(self) -> RecordSchema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_field_order() {
        let schema = RecordSchema::builder("Event")
            .field("dt", FieldType::Date)
            .field("i", FieldType::Int)
            .build();
        let fields: Vec<_> = schema.fields().collect();
        assert_eq!(fields[0], ("dt", &FieldType::Date));
        assert_eq!(fields[1], ("i", &FieldType::Int));
        assert!(!schema.dialect_support());
        assert_eq!(schema.default_dialect(), None);
    }

    #[test]
    fn record_value_set_replaces() {
        let mut rv = RecordValue::new("Event").with("i", FieldValue::Int(1));
        rv.set("i", FieldValue::Int(2));
        assert_eq!(rv.get("i"), Some(&FieldValue::Int(2)));
        assert_eq!(rv.fields().count(), 1);
    }

    #[test]
    fn field_type_display() {
        assert_eq!(FieldType::Date.to_string(), "date");
        assert_eq!(
            FieldType::List(Box::new(FieldType::Record("Inner".into()))).to_string(),
            "list<record 'Inner'>"
        );
    }
}
