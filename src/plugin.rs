// Copyright 2025 Cowboy AI, LLC.

//! Schema plugins and the retain-populate registration

use tracing::debug;

use crate::schema::Schema;
use crate::transform::retain_populated;

/// Trait for plugins applied to a schema at definition time
///
/// A plugin runs once, synchronously, and mutates the schema's conversion
/// options in place. After application the schema is only read.
pub trait SchemaPlugin {
    /// Name of this plugin
    fn name(&self) -> &'static str;

    /// Apply the plugin to a schema
    fn apply(&self, schema: &mut Schema);
}

/// Plugin that retains reference identifiers alongside populated data
///
/// Wraps the schema's `to_object` and `to_json` transform slots
/// independently; each wrapper captures its own prior transform, so the two
/// conversion paths keep any distinct behavior they already had.
///
/// # Examples
///
/// ```rust
/// use cim_populate::{retain_populate, FieldKind, Schema};
///
/// let mut schema = Schema::new()
///     .field("name", FieldKind::Value)
///     .field("profile", FieldKind::Reference);
///
/// retain_populate(&mut schema);
///
/// assert!(schema.options.to_object.transform.is_some());
/// assert!(schema.options.to_json.transform.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainPopulate;

impl SchemaPlugin for RetainPopulate {
    fn name(&self) -> &'static str {
        "retain_populate"
    }

    fn apply(&self, schema: &mut Schema) {
        let prior = schema.options.to_object.transform.take();
        schema.options.to_object.transform = Some(retain_populated(prior));

        let prior = schema.options.to_json.transform.take();
        schema.options.to_json.transform = Some(retain_populated(prior));

        debug!(plugin = self.name(), "wrapped schema conversion transforms");
    }
}

/// Apply the retain-populate plugin to a schema
pub fn retain_populate(schema: &mut Schema) {
    schema.plugin(&RetainPopulate);
}
