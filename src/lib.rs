//! # CIM Populate
//!
//! Retain-populate schema plugin for CIM document serialization.
//!
//! When the host populates a reference field, the stored identifier is
//! replaced by the referenced document's data, and the identifier is lost
//! from the serialized output. Applying this plugin to a schema wraps its
//! conversion transforms so that both survive: the field keeps the original
//! reference identifier(s), and the populated data lands under a derived
//! `<field>_populated` sibling.
//!
//! Building blocks:
//! - **Schema**: ordered field declarations plus the two conversion slots
//!   (`to_object`, `to_json`), each holding an optional transform
//! - **Document**: a schema-bound field map with a host-owned record of
//!   which reference fields were populated
//! - **Transform**: a pure function from `(document, record)` to `record`,
//!   run at the end of a conversion call
//! - **Plugin**: a one-time, synchronous mutation of a schema's conversion
//!   options; retain-populate wraps each slot's prior transform
//!   independently
//!
//! ## Design Principles
//!
//! 1. **Composition**: the plugin layers behavior over whatever transform a
//!    schema already configured, in either slot
//! 2. **Explicit seams**: population state is reached only through the
//!    [`PopulatedFields`] capability, never through host internals
//! 3. **Pure transforms**: a transform returns its record; there is no
//!    mutate-in-place convention to honor
//! 4. **Host-owned population**: fetching referenced documents stays the
//!    host's job; this crate only records and serializes its outcome
//!
//! ## Quick start
//!
//! ```rust
//! use cim_populate::{retain_populate, Document, DocumentId, FieldKind, Schema};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut schema = Schema::new()
//!     .field("name", FieldKind::Value)
//!     .field("profile", FieldKind::Reference);
//! retain_populate(&mut schema);
//!
//! let mut doc = Document::new(Arc::new(schema));
//! let profile_id = DocumentId::new();
//! doc.set("name", "Alice").unwrap();
//! doc.set("profile", profile_id).unwrap();
//! doc.set_populated("profile", json!({"bio": "hello"})).unwrap();
//!
//! let ret = doc.to_object();
//! assert_eq!(ret["profile"], json!(profile_id.to_string()));
//! assert_eq!(ret["profile_populated"], json!({"bio": "hello"}));
//! ```

#![warn(missing_docs)]

mod document;
mod errors;
mod identifiers;
mod plugin;
mod schema;
mod transform;

// Re-export core types
pub use document::{Document, PopulatedEntry, PopulatedFields};
pub use errors::{PopulateError, PopulateResult};
pub use identifiers::DocumentId;
pub use plugin::{retain_populate, RetainPopulate, SchemaPlugin};
pub use schema::{ConversionOptions, FieldKind, Schema, SchemaOptions};
pub use transform::{populated_name, retain_populated, OutputRecord, Transform, POPULATED_SUFFIX};
