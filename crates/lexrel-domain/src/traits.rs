//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates.

use crate::{Relation, RelationId};

/// Trait for the snapshot persistence layer
///
/// A synchronous string-keyed key-value store; values are whole
/// serialized objects (the relation collection, form state). Implemented
/// by the infrastructure layer (lexrel-store).
pub trait SnapshotStore {
    /// Error type for persistence operations
    type Error;

    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Trait for the remote relation service
///
/// A resource-oriented transport over the relation collection.
/// Implemented by the infrastructure layer (lexrel-remote).
pub trait RelationService {
    /// Error type for transport operations
    type Error;

    /// Fetch the full remote collection
    fn fetch_all(&self) -> impl std::future::Future<Output = Result<Vec<Relation>, Self::Error>>;

    /// Create a record remotely; returns the service's echo of it
    fn create(
        &self,
        record: &Relation,
    ) -> impl std::future::Future<Output = Result<Relation, Self::Error>>;

    /// Delete a record remotely by id
    fn delete(&self, id: RelationId) -> impl std::future::Future<Output = Result<(), Self::Error>>;
}

/// Trait for the notification sink
///
/// Fire-and-forget user-visible error display; used only for validator
/// rejections. No structured return value is consumed.
pub trait Notifier {
    /// Surface an advisory error message to the user
    fn notify_error(&self, message: &str);
}
