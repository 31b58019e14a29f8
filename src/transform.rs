// Copyright 2025 Cowboy AI, LLC.

//! Transform composition for document conversion
//!
//! A transform is a pure function from `(document, record)` to `record`,
//! run at the end of a conversion call. The composer in this module wraps an
//! optional prior transform with retain-populate behavior: populated
//! reference fields keep their original identifier(s), and the populated
//! data moves to a `<field>_populated` sibling.

use serde_json::Value;
use std::sync::Arc;

use crate::document::{Document, PopulatedFields};

/// The mutable plain-object representation built during conversion
pub type OutputRecord = serde_json::Map<String, Value>;

/// A conversion transform
///
/// Transforms receive the document being converted and the record built so
/// far, and return the record to use. Panics inside a transform propagate
/// uncaught to the conversion caller.
pub type Transform = Arc<dyn Fn(&Document, OutputRecord) -> OutputRecord + Send + Sync>;

/// Suffix appended to a populated field's name to hold its populated data
pub const POPULATED_SUFFIX: &str = "_populated";

/// Derive the sibling field name that holds populated data
pub fn populated_name(field: &str) -> String {
    format!("{field}{POPULATED_SUFFIX}")
}

/// Compose retain-populate behavior around an optional prior transform
///
/// The returned transform first delegates to `original` when present, then
/// rewrites every populated field in the record: the field itself gets the
/// pre-population identifier(s) back, and the populated data lands under the
/// derived `_populated` name. Single references and reference arrays take
/// the same two-step rewrite; the population record already carries the
/// correct shape.
///
/// A populated field absent from the record (removed by the prior
/// transform, for instance) is skipped entirely: no identifier is restored
/// and no `_populated` sibling is written.
pub fn retain_populated(original: Option<Transform>) -> Transform {
    Arc::new(move |doc, ret| {
        let mut ret = match &original {
            Some(transform) => transform(doc, ret),
            None => ret,
        };

        if doc.populated().is_empty() {
            return ret;
        }

        for (field, entry) in doc.populated() {
            let Some(populated) = ret.get(field).cloned() else {
                continue;
            };
            // Replacing in place keeps the field's position; the sibling
            // appends after all declared fields.
            ret.insert(field.clone(), entry.value.clone());
            ret.insert(populated_name(field), populated);
        }

        ret
    })
}
