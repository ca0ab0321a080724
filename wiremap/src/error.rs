//! Error types for schema registration and record conversion.

use std::fmt;

use crate::schema::FieldType;

/// Errors that can occur while registering dialects and record schemas.
#[derive(Debug)]
pub enum SchemaError {
    /// A default-dialect reference does not name a defined dialect.
    ///
    /// Raised at registration time, before any instance is converted.
    BadDialect { name: String },
    /// A field refers to a record type that has not been registered.
    UnknownRecord { record: String },
    /// A record with the same name but a different shape is already registered.
    DuplicateRecord { record: String },
    /// A dialect with this name is already defined.
    DuplicateDialect { name: String },
    /// No builtin codec exists for the declared type.
    UnsupportedType { ty: FieldType },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDialect { name } => {
                write!(f, "'{name}' is not a defined dialect")
            }
            Self::UnknownRecord { record } => {
                write!(f, "unknown record type '{record}'")
            }
            Self::DuplicateRecord { record } => {
                write!(
                    f,
                    "record type '{record}' is already registered with a different shape"
                )
            }
            Self::DuplicateDialect { name } => {
                write!(f, "dialect '{name}' is already defined")
            }
            Self::UnsupportedType { ty } => {
                write!(f, "no builtin codec for declared type {ty}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors that can occur during `to_mapping` / `from_mapping`.
#[derive(Debug)]
pub enum ConvertError {
    /// An explicit dialect reference does not name a defined dialect.
    ///
    /// Raised at call entry, before any field is converted.
    BadDialect { name: String },
    /// A dialect argument was supplied to a record whose entry points do
    /// not declare one (`dialect_support` is false).
    ///
    /// This reflects the entry point's declared shape, not dialect
    /// validity, and is deliberately distinct from [`BadDialect`](Self::BadDialect).
    DialectNotSupported { record: String },
    /// The record type is not registered.
    UnknownRecord { record: String },
    /// A declared field was missing from the instance or the mapping.
    MissingField { field: String, record: String },
    /// A field value had an unexpected shape.
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// A codec rejected a field value.
    Codec { field: String, message: String },
    /// Format encoding error (RON/bincode).
    Format(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDialect { name } => {
                write!(f, "'{name}' is not a defined dialect")
            }
            Self::DialectNotSupported { record } => {
                write!(
                    f,
                    "record type '{record}' does not accept a dialect argument"
                )
            }
            Self::UnknownRecord { record } => {
                write!(f, "unknown record type '{record}'")
            }
            Self::MissingField { field, record } => {
                write!(f, "missing field '{field}' in record '{record}'")
            }
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "type mismatch for field '{field}': expected {expected}, found {found}"
                )
            }
            Self::Codec { field, message } => {
                write!(f, "failed to convert field '{field}': {message}")
            }
            Self::Format(msg) => write!(f, "format error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}
