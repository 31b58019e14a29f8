// Copyright 2025 Cowboy AI, LLC.

//! Documents with schema-bound fields and a population record
//!
//! `Document` is the host side of the plugin contract: it owns the field
//! values, records which reference fields were populated, and runs the
//! configured transform on every conversion call. The plugin never reads
//! the population record directly; it goes through the [`PopulatedFields`]
//! capability, so a different host can supply its own implementation.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{PopulateError, PopulateResult};
use crate::schema::Schema;
use crate::transform::OutputRecord;

/// Per-field population metadata
///
/// Recorded when a reference field is populated; holds the field's
/// pre-population value (the reference identifier, or the ordered
/// identifiers for an array reference).
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedEntry {
    /// The field's value before population
    pub value: Value,
}

/// Capability interface over a document's population record
///
/// Given a document, answers which fields were populated and what their
/// pre-population values were. The record is read-only from the consumer's
/// perspective; producing it is the host's job.
pub trait PopulatedFields {
    /// Populated field names with their pre-population values, in the order
    /// population was recorded
    fn populated(&self) -> &IndexMap<String, PopulatedEntry>;
}

/// A document instance bound to a schema
///
/// # Examples
///
/// ```rust
/// use cim_populate::{Document, FieldKind, Schema};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let schema = Arc::new(
///     Schema::new()
///         .field("title", FieldKind::Value)
///         .field("author", FieldKind::Reference),
/// );
///
/// let mut doc = Document::new(schema);
/// doc.set("title", "Hello").unwrap();
/// doc.set("author", "user-1").unwrap();
///
/// // The host fetched the referenced document; record the outcome
/// doc.set_populated("author", json!({"name": "Alice"})).unwrap();
///
/// assert_eq!(doc.get("author"), Some(&json!({"name": "Alice"})));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    schema: Arc<Schema>,
    fields: OutputRecord,
    populated: IndexMap<String, PopulatedEntry>,
}

impl Document {
    /// Create an empty document bound to a schema
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            fields: OutputRecord::new(),
            populated: IndexMap::new(),
        }
    }

    /// The schema this document is bound to
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Set a declared field's value
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the schema does not declare the field, or
    /// `SerializationError` if the value cannot be converted.
    pub fn set(&mut self, field: &str, value: impl Serialize) -> PopulateResult<()> {
        if self.schema.field_kind(field).is_none() {
            return Err(PopulateError::UnknownField {
                field: field.to_string(),
            });
        }
        let value = serde_json::to_value(value)?;
        self.fields.insert(field.to_string(), value);
        Ok(())
    }

    /// Get a field's current value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Record that the host populated a reference field
    ///
    /// Moves the field's current value (the reference identifier or
    /// identifiers) into the population record and installs the populated
    /// data as the field's value, mirroring what population does in the
    /// host. The fetch itself is the host's responsibility; this only
    /// records its outcome.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for undeclared fields, `NotAReference` for
    /// declared non-reference fields, or `SerializationError` if the
    /// populated data cannot be converted.
    pub fn set_populated(&mut self, field: &str, data: impl Serialize) -> PopulateResult<()> {
        let kind = self
            .schema
            .field_kind(field)
            .ok_or_else(|| PopulateError::UnknownField {
                field: field.to_string(),
            })?;
        if !kind.is_reference() {
            return Err(PopulateError::NotAReference {
                field: field.to_string(),
            });
        }

        let data = serde_json::to_value(data)?;
        let original = self.fields.get(field).cloned().unwrap_or(Value::Null);

        self.populated
            .insert(field.to_string(), PopulatedEntry { value: original });
        self.fields.insert(field.to_string(), data);
        Ok(())
    }

    /// Serialize the current field values into a fresh output record,
    /// without running any transform
    pub fn serialized_fields(&self) -> OutputRecord {
        self.fields.clone()
    }

    /// Convert to a plain output record
    ///
    /// Runs the schema's `to_object` transform when one is configured.
    pub fn to_object(&self) -> OutputRecord {
        let ret = self.serialized_fields();
        let transform = &self.schema.options.to_object.transform;
        debug!(
            fields = ret.len(),
            transformed = transform.is_some(),
            "converting document to object"
        );
        match transform {
            Some(transform) => transform(self, ret),
            None => ret,
        }
    }

    /// Convert to a JSON value
    ///
    /// Runs the schema's `to_json` transform when one is configured. The
    /// two conversion paths are independent.
    pub fn to_json(&self) -> Value {
        let ret = self.serialized_fields();
        let transform = &self.schema.options.to_json.transform;
        debug!(
            fields = ret.len(),
            transformed = transform.is_some(),
            "converting document to JSON"
        );
        let ret = match transform {
            Some(transform) => transform(self, ret),
            None => ret,
        };
        Value::Object(ret)
    }

    /// Serialize the JSON conversion to a string
    pub fn to_json_string(&self) -> PopulateResult<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }
}

impl PopulatedFields for Document {
    fn populated(&self) -> &IndexMap<String, PopulatedEntry> {
        &self.populated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;
    use serde_json::json;

    fn user_schema() -> Arc<Schema> {
        Arc::new(
            Schema::new()
                .field("name", FieldKind::Value)
                .field("profile", FieldKind::Reference)
                .field("posts", FieldKind::ReferenceArray),
        )
    }

    /// Test setting and reading fields
    #[test]
    fn test_set_and_get() {
        let mut doc = Document::new(user_schema());
        doc.set("name", "Alice").unwrap();

        assert_eq!(doc.get("name"), Some(&json!("Alice")));
        assert_eq!(doc.get("profile"), None);
    }

    /// Test the schema accessor exposes the bound declarations
    #[test]
    fn test_schema_accessor() {
        let doc = Document::new(user_schema());

        assert_eq!(doc.schema().field_kind("profile"), Some(FieldKind::Reference));
        assert_eq!(
            doc.schema().field_kind("posts"),
            Some(FieldKind::ReferenceArray)
        );
        assert_eq!(doc.schema().field_kind("missing"), None);
    }

    /// Test undeclared fields are rejected
    #[test]
    fn test_set_unknown_field() {
        let mut doc = Document::new(user_schema());
        let err = doc.set("nickname", "Al").unwrap_err();

        assert!(matches!(err, PopulateError::UnknownField { .. }));
    }

    /// Test population moves the identifier into the record
    #[test]
    fn test_set_populated_records_original_value() {
        let mut doc = Document::new(user_schema());
        doc.set("profile", "profile-1").unwrap();
        doc.set_populated("profile", json!({"bio": "hello"})).unwrap();

        assert_eq!(doc.get("profile"), Some(&json!({"bio": "hello"})));

        let record = doc.populated();
        assert_eq!(record.len(), 1);
        assert_eq!(record["profile"].value, json!("profile-1"));
    }

    /// Test array references keep their identifier ordering
    #[test]
    fn test_set_populated_array_reference() {
        let mut doc = Document::new(user_schema());
        doc.set("posts", json!(["post-1", "post-2"])).unwrap();
        doc.set_populated(
            "posts",
            json!([{"title": "First"}, {"title": "Second"}]),
        )
        .unwrap();

        let record = doc.populated();
        assert_eq!(record["posts"].value, json!(["post-1", "post-2"]));
        assert_eq!(
            doc.get("posts"),
            Some(&json!([{"title": "First"}, {"title": "Second"}]))
        );
    }

    /// Test population of non-reference fields is rejected
    #[test]
    fn test_set_populated_non_reference() {
        let mut doc = Document::new(user_schema());
        doc.set("name", "Alice").unwrap();

        let err = doc.set_populated("name", json!({})).unwrap_err();
        assert!(matches!(err, PopulateError::NotAReference { .. }));

        let err = doc.set_populated("missing", json!({})).unwrap_err();
        assert!(matches!(err, PopulateError::UnknownField { .. }));
    }

    /// Test conversion without transforms returns the raw fields
    #[test]
    fn test_to_object_without_transform() {
        let mut doc = Document::new(user_schema());
        doc.set("name", "Alice").unwrap();

        let ret = doc.to_object();
        assert_eq!(ret, doc.serialized_fields());
    }

    /// Test both conversion calls emit a debug event
    #[test]
    fn test_conversion_emits_debug_events() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct EventCounter {
            events: Arc<AtomicUsize>,
        }

        impl tracing::Subscriber for EventCounter {
            fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
                true
            }
            fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
                tracing::span::Id::from_u64(1)
            }
            fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}
            fn record_follows_from(
                &self,
                _span: &tracing::span::Id,
                _follows: &tracing::span::Id,
            ) {
            }
            fn event(&self, _event: &tracing::Event<'_>) {
                self.events.fetch_add(1, Ordering::SeqCst);
            }
            fn enter(&self, _span: &tracing::span::Id) {}
            fn exit(&self, _span: &tracing::span::Id) {}
        }

        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = EventCounter {
            events: Arc::clone(&events),
        };

        tracing::subscriber::with_default(subscriber, || {
            let mut doc = Document::new(user_schema());
            doc.set("name", "Alice").unwrap();
            doc.to_object();
            doc.to_json();
        });

        assert_eq!(events.load(Ordering::SeqCst), 2);
    }

    /// Test JSON conversion produces an object value
    #[test]
    fn test_to_json_shape() {
        let mut doc = Document::new(user_schema());
        doc.set("name", "Alice").unwrap();

        let json = doc.to_json();
        assert_eq!(json, json!({"name": "Alice"}));

        let rendered = doc.to_json_string().unwrap();
        assert_eq!(rendered, r#"{"name":"Alice"}"#);
    }
}
