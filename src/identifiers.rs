//! Identifier types for documents and references

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Document ID - the identifier stored in a reference field
///
/// Before population, a reference field holds one of these (or an ordered
/// sequence of them for array references). Population replaces the stored
/// identifier with the referenced document's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Create a new random document ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DocumentId> for Uuid {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl From<&DocumentId> for Uuid {
    fn from(id: &DocumentId) -> Self {
        id.0
    }
}
