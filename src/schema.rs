//! Schema definitions with field declarations and conversion options

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::plugin::SchemaPlugin;
use crate::transform::Transform;

/// Declared shape of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// A plain value stored inline
    Value,
    /// A single reference to another document, expandable via population
    Reference,
    /// An ordered sequence of references, expandable via population
    ReferenceArray,
}

impl FieldKind {
    /// Check whether this field can be populated
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldKind::Reference | FieldKind::ReferenceArray)
    }
}

/// Configuration for one conversion path (`to_object` or `to_json`)
///
/// The transform slot is read on every conversion call. Plugins replace it
/// at schema-definition time, wrapping whatever was configured before.
#[derive(Default, Clone)]
pub struct ConversionOptions {
    /// Transform run at the end of this conversion path, if any
    pub transform: Option<Transform>,
}

impl fmt::Debug for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field(
                "transform",
                &if self.transform.is_some() {
                    "<set>"
                } else {
                    "<unset>"
                },
            )
            .finish()
    }
}

/// Conversion configuration owned by a schema
///
/// The two slots are independent: a schema can behave differently under
/// object conversion and JSON conversion.
#[derive(Debug, Default, Clone)]
pub struct SchemaOptions {
    /// Options for plain-object conversion
    pub to_object: ConversionOptions,
    /// Options for JSON conversion
    pub to_json: ConversionOptions,
}

/// A document schema: ordered field declarations plus conversion options
///
/// # Examples
///
/// ```rust
/// use cim_populate::{FieldKind, Schema};
///
/// let schema = Schema::new()
///     .field("name", FieldKind::Value)
///     .field("profile", FieldKind::Reference)
///     .field("posts", FieldKind::ReferenceArray);
///
/// assert_eq!(schema.field_kind("profile"), Some(FieldKind::Reference));
/// assert_eq!(schema.field_kind("missing"), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Schema {
    fields: IndexMap<String, FieldKind>,
    /// Conversion configuration, mutated in place by plugins
    pub options: SchemaOptions,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field, preserving declaration order
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// Look up a declared field's kind
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    /// Iterate over declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Apply a plugin to this schema
    ///
    /// Plugins run once, synchronously, and mutate the schema's conversion
    /// options in place.
    pub fn plugin(&mut self, plugin: &dyn SchemaPlugin) {
        plugin.apply(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(FieldKind::Value => false ; "plain value")]
    #[test_case(FieldKind::Reference => true ; "single reference")]
    #[test_case(FieldKind::ReferenceArray => true ; "reference array")]
    fn test_is_reference(kind: FieldKind) -> bool {
        kind.is_reference()
    }

    /// Test field declaration order is preserved
    #[test]
    fn test_field_declaration_order() {
        let schema = Schema::new()
            .field("name", FieldKind::Value)
            .field("profile", FieldKind::Reference)
            .field("posts", FieldKind::ReferenceArray);

        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["name", "profile", "posts"]);
    }

    /// Test the serialized representation of field kinds
    #[test]
    fn test_field_kind_serde() {
        let json = serde_json::to_value(FieldKind::ReferenceArray).unwrap();
        assert_eq!(json, serde_json::Value::String("ReferenceArray".to_string()));

        let back: FieldKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, FieldKind::ReferenceArray);
    }

    /// Test conversion slots start empty
    #[test]
    fn test_default_options_have_no_transforms() {
        let schema = Schema::new().field("name", FieldKind::Value);

        assert!(schema.options.to_object.transform.is_none());
        assert!(schema.options.to_json.transform.is_none());
    }

    /// Test debug formatting does not require the transform to be Debug
    #[test]
    fn test_conversion_options_debug() {
        let options = ConversionOptions::default();
        let rendered = format!("{options:?}");
        assert!(rendered.contains("<unset>"));
    }
}
