//! Form-state value object shared by the add and edit forms

use serde::{Deserialize, Serialize};

use crate::{Relation, RelationId};

/// Names of the fields a form exposes, in display order.
pub const FIELD_NAMES: [&str; 3] = ["word1", "word2", "relation"];

/// The three text fields of an add or edit form
///
/// The view layer reads and writes one string field at a time, keyed by
/// field name; unknown names are reported to the caller rather than
/// silently dropped. The whole object is serialized to the persistence
/// layer so a restarted session resumes with a half-typed form intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    /// First word input
    #[serde(default)]
    pub word1: String,

    /// Second word input
    #[serde(default)]
    pub word2: String,

    /// Relationship name input
    #[serde(default)]
    pub relation: String,
}

impl FormFields {
    /// Read a field by name; `None` for an unknown field name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "word1" => Some(&self.word1),
            "word2" => Some(&self.word2),
            "relation" => Some(&self.relation),
            _ => None,
        }
    }

    /// Write a field by name; returns `false` for an unknown field name.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match name {
            "word1" => self.word1 = value.into(),
            "word2" => self.word2 = value.into(),
            "relation" => self.relation = value.into(),
            _ => return false,
        }
        true
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.word1.is_empty() && self.word2.is_empty() && self.relation.is_empty()
    }

    /// Reset all fields to empty (after a successful submit).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the record an edit-form submission produces, carrying the
    /// id of the record under edit.
    pub fn to_relation(&self, id: RelationId) -> Relation {
        Relation::with_id(id, &*self.word1, &*self.word2, &*self.relation)
    }
}

impl From<&Relation> for FormFields {
    /// Load an existing record into a form (the edit-click path).
    fn from(record: &Relation) -> Self {
        Self {
            word1: record.word1.clone(),
            word2: record.word2.clone(),
            relation: record.relation.clone(),
        }
    }
}
