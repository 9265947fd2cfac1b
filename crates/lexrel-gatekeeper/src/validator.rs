//! Relation eligibility validation logic

use std::fmt;

use lexrel_domain::{Relation, RelationId};

use crate::ValidationConfig;

/// Result of relation validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the candidate passed validation
    pub status: ValidationStatus,

    /// Rejection reason, present iff rejected
    pub reason: Option<RejectionReason>,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            status: ValidationStatus::Accepted,
            reason: None,
        }
    }

    fn rejected(reason: RejectionReason) -> Self {
        Self {
            status: ValidationStatus::Rejected,
            reason: Some(reason),
        }
    }

    /// True when the candidate was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Candidate accepted
    Accepted,

    /// Candidate rejected
    Rejected,
}

/// Reasons for rejection
///
/// The `Display` text is the advisory message shown to the user; it is
/// not a structured error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The candidate's two words are cyclic rotations of each other
    RotationPair,

    /// The candidate's unordered word pair already exists
    DuplicatePair {
        /// Id of the existing record holding the same pair
        existing_id: RelationId,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotationPair => write!(f, "words are rotations of each other"),
            Self::DuplicatePair { .. } => {
                write!(f, "relation between those words already exists")
            }
        }
    }
}

/// Two strings are cyclic rotations of one another iff they have equal
/// length and one is a contiguous substring of the other concatenated
/// with itself.
///
/// # Examples
///
/// ```
/// use lexrel_gatekeeper::are_rotations;
///
/// assert!(are_rotations("abc", "bca"));
/// assert!(!are_rotations("abc", "acb"));
/// ```
pub fn are_rotations(a: &str, b: &str) -> bool {
    a.len() == b.len() && [a, a].concat().contains(b)
}

/// The Gatekeeper validates candidate records before insertion
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// True when edits should be re-validated (consulted by the store)
    pub fn revalidates_on_update(&self) -> bool {
        self.config.revalidate_on_update
    }

    /// Validate a candidate record against the existing collection
    ///
    /// Checks run in existing-record order and the first disqualifying
    /// record determines the rejection. This operation never fails: the
    /// reason is advisory display text and rejection has no side effect.
    pub fn check(&self, existing: &[Relation], candidate: &Relation) -> ValidationResult {
        let word1 = candidate.word1.to_lowercase();
        let word2 = candidate.word2.to_lowercase();

        // Rotation depends only on the candidate, so it is a single
        // up-front check. With the flag off it applies only when there
        // are existing records to scan, so the first insertion is never
        // rotation-checked.
        let rotation_applies = !existing.is_empty() || self.config.rotation_check_on_empty;
        if rotation_applies && are_rotations(&word1, &word2) {
            return ValidationResult::rejected(RejectionReason::RotationPair);
        }

        for record in existing {
            let w1 = record.word1.to_lowercase();
            let w2 = record.word2.to_lowercase();
            // unordered pair equality, case-insensitive
            if (w1 == word1 && w2 == word2) || (w1 == word2 && w2 == word1) {
                return ValidationResult::rejected(RejectionReason::DuplicatePair {
                    existing_id: record.id,
                });
            }
        }

        ValidationResult::accepted()
    }
}

impl Default for Gatekeeper {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(word1: &str, word2: &str, relation: &str) -> Relation {
        Relation::new(word1, word2, relation)
    }

    #[test]
    fn test_are_rotations() {
        assert!(are_rotations("abc", "bca"));
        assert!(are_rotations("abc", "cab"));
        assert!(are_rotations("abc", "abc"));
        assert!(!are_rotations("abc", "acb"));
        assert!(!are_rotations("abc", "abcd"));
        assert!(!are_rotations("abc", "ab"));
    }

    #[test]
    fn test_accepts_unrelated_pair() {
        let gatekeeper = Gatekeeper::default();
        let existing = [record("cat", "dog", "opposite")];
        let result = gatekeeper.check(&existing, &record("sun", "moon", "opposite"));
        assert!(result.is_accepted());
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_rejects_duplicate_pair_reversed_and_cased() {
        let gatekeeper = Gatekeeper::default();
        let existing = [record("cat", "dog", "opposite")];
        let result = gatekeeper.check(&existing, &record("Dog", "CAT", "opp2"));

        assert_eq!(result.status, ValidationStatus::Rejected);
        let reason = result.reason.unwrap();
        assert_eq!(
            reason,
            RejectionReason::DuplicatePair {
                existing_id: existing[0].id
            }
        );
        assert_eq!(
            reason.to_string(),
            "relation between those words already exists"
        );
    }

    #[test]
    fn test_rejects_rotation_pair_against_nonempty_collection() {
        let gatekeeper = Gatekeeper::default();
        let existing = [record("cat", "dog", "opposite")];
        let result = gatekeeper.check(&existing, &record("abc", "bca", "anagram"));

        assert_eq!(result.status, ValidationStatus::Rejected);
        assert_eq!(result.reason, Some(RejectionReason::RotationPair));
        assert_eq!(
            result.reason.unwrap().to_string(),
            "words are rotations of each other"
        );
    }

    #[test]
    fn test_rotation_pair_slips_through_empty_collection() {
        // Default behavior: first insertion is never rotation-checked.
        let gatekeeper = Gatekeeper::default();
        let result = gatekeeper.check(&[], &record("abc", "bca", "anagram"));
        assert!(result.is_accepted());
    }

    #[test]
    fn test_strict_checks_rotation_on_empty_collection() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::strict());
        let result = gatekeeper.check(&[], &record("abc", "bca", "anagram"));
        assert_eq!(result.reason, Some(RejectionReason::RotationPair));
    }

    #[test]
    fn test_first_disqualifying_record_wins() {
        let gatekeeper = Gatekeeper::default();
        let existing = [
            record("sun", "moon", "opposite"),
            record("cat", "dog", "opposite"),
            record("dog", "cat", "duplicate-of-previous"),
        ];
        let result = gatekeeper.check(&existing, &record("cat", "dog", "again"));

        match result.reason {
            Some(RejectionReason::DuplicatePair { existing_id }) => {
                assert_eq!(existing_id, existing[1].id)
            }
            other => panic!("expected DuplicatePair, got {:?}", other),
        }
    }

    #[test]
    fn test_rotation_checked_before_duplicates() {
        // "ab"/"ba" is both a rotation and a duplicate of an existing
        // pair; rotation wins because it runs first.
        let gatekeeper = Gatekeeper::default();
        let existing = [record("ab", "ba", "seed")];
        let result = gatekeeper.check(&existing, &record("ab", "ba", "again"));
        assert_eq!(result.reason, Some(RejectionReason::RotationPair));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every non-empty string is a rotation of itself
        #[test]
        fn test_self_rotation(s in "[a-z]{1,18}") {
            prop_assert!(are_rotations(&s, &s));
        }

        /// Property: rotating at any split point yields a rotation
        #[test]
        fn test_constructed_rotations(s in "[a-z]{1,18}", split in 0usize..18) {
            let split = split % s.len().max(1);
            let rotated = format!("{}{}", &s[split..], &s[..split]);
            prop_assert!(are_rotations(&s, &rotated));
        }

        /// Property: strings of different lengths are never rotations
        #[test]
        fn test_length_mismatch(a in "[a-z]{1,9}", b in "[a-z]{10,18}") {
            prop_assert!(!are_rotations(&a, &b));
        }
    }
}
