//! # wiremap
//!
//! Conversion of structured records (named, typed fields) to and from a
//! generic key/value wire mapping, with per-type codec bundles ("dialects")
//! configurable per type, per record, and per call.
//!
//! ## Core Types
//!
//! - [`Value`] — format-agnostic wire mapping representation
//! - [`FieldType`] / [`FieldValue`] / [`RecordValue`] — declared types and
//!   runtime record instances
//! - [`Codec`] — immutable serialize/deserialize pair bound to one type
//! - [`Dialect`] — named, immutable bundle of per-type codec overrides
//! - [`RecordSchema`] — declarative registration step for a record type
//! - [`RecordDescriptor`] — per-type conversion metadata, built once
//! - [`Registry`] — dialect/record registry and conversion entry points
//!
//! ## Resolution
//!
//! For every field, the codec is chosen by precedence: the explicit
//! call-site dialect (if the record opted into dialect support), then the
//! record's own default dialect, then the builtin table. Dialects may be
//! partial; an uncovered type falls through silently. A record's default
//! dialect applies to its own fields only, while an explicit call-site
//! dialect propagates into every nested record that supports dialects.
//! The no-override path runs on codecs resolved at registration time and
//! performs no per-call lookups.
//!
//! See `DESIGN.md` in the repository root for architecture decisions.

mod codec;
mod descriptor;
mod dialect;
mod error;
mod format;
mod registry;
mod resolve;
mod schema;
mod value;

pub use codec::{builtin, Codec, CodecError};
pub use descriptor::RecordDescriptor;
pub use dialect::{Dialect, DialectArg, DialectBuilder};
pub use error::{ConvertError, SchemaError};
pub use format::{decode, encode, Format};
pub use registry::Registry;
pub use resolve::{resolve, ResolveCtx};
pub use schema::{FieldType, FieldValue, RecordSchema, RecordSchemaBuilder, RecordValue};
pub use value::Value;
