//! Relation module - the record type the whole system revolves around

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for a relation record, backed by UUIDv7
///
/// Ids are minted client-side at creation time and immutable
/// thereafter. UUIDv7 provides:
/// - Chronological sortability matching insertion order
/// - 128-bit uniqueness without coordination
/// - RFC 9562-standard string form for the wire and the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationId(u128);

impl RelationId {
    /// Mint a fresh UUIDv7-based RelationId
    ///
    /// # Examples
    ///
    /// ```
    /// use lexrel_domain::RelationId;
    ///
    /// let id = RelationId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RelationId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization and tests.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RelationId from its hyphenated UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use lexrel_domain::RelationId;
    ///
    /// let id = RelationId::new();
    /// let parsed = RelationId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid relation id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

// Ids travel as canonical UUID strings in JSON, both on the wire and in
// the persisted snapshot.
impl Serialize for RelationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RelationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// A relation record: two words and a labeled relationship between them
///
/// The id is preserved across edits; the three word fields are free-form
/// strings. The input layer constrains them to short alphabetic words,
/// but nothing here depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Unique identifier, minted at creation
    pub id: RelationId,

    /// First word of the pair
    pub word1: String,

    /// Second word of the pair
    pub word2: String,

    /// Name of the relationship between the two words
    pub relation: String,
}

impl Relation {
    /// Create a new relation record with a freshly minted id
    pub fn new(
        word1: impl Into<String>,
        word2: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            id: RelationId::new(),
            word1: word1.into(),
            word2: word2.into(),
            relation: relation.into(),
        }
    }

    /// Rebuild a record with an existing id (edit-form submission)
    pub fn with_id(
        id: RelationId,
        word1: impl Into<String>,
        word2: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            word1: word1.into(),
            word2: word2.into(),
            relation: relation.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_id_ordering() {
        let id1 = RelationId::from_value(1000);
        let id2 = RelationId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_relation_id_display_and_parse() {
        let id = RelationId::new();
        let id_str = id.to_string();

        // UUID strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = RelationId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_relation_id_invalid_string() {
        assert!(RelationId::from_string("not-a-valid-uuid").is_err());
        assert!(RelationId::from_string("").is_err());
    }

    #[test]
    fn test_relation_json_shape() {
        let record = Relation::with_id(
            RelationId::from_value(7),
            "cat",
            "dog",
            "opposite",
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["word1"], "cat");
        assert_eq!(json["word2"], "dog");
        assert_eq!(json["relation"], "opposite");
        // id is a plain string, not a nested object
        assert!(json["id"].is_string());

        let back: Relation = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
