//! lexrel Gatekeeper
//!
//! Decides whether a proposed relation record may join the existing
//! collection, before any insertion is committed.
//!
//! The Gatekeeper provides:
//! - Rotation checking (a record's two words must not be cyclic
//!   rotations of one another)
//! - Duplicate-pair detection (no two records may denote the same
//!   unordered, case-insensitive pair of words)
//!
//! # Examples
//!
//! ```
//! use lexrel_domain::Relation;
//! use lexrel_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let candidate = Relation::new("cat", "dog", "opposite");
//! let result = gatekeeper.check(&[], &candidate);
//! assert!(result.is_accepted());
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::{are_rotations, Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
