//! lexrel Storage Layer
//!
//! Owns the canonical in-memory relation collection and mediates every
//! mutation through snapshot persistence and the remote service.
//!
//! # Protocol
//!
//! - Bootstrap: persisted snapshot, falling back to a remote fetch,
//!   falling back to empty. Never fails.
//! - Create: validate against the existing collection, POST to the
//!   remote service, and only after the acknowledgement persist and
//!   apply locally.
//! - Update: in-place replacement by id, persisted; no remote call
//!   (the service exposes no update endpoint).
//! - Delete: remote first, then persist and apply.
//!
//! Every successful mutation overwrites the whole persisted snapshot.
//! The snapshot is written *before* the in-memory swap, so persistence
//! failures leave memory unmodified, the same as remote failures.
//!
//! # Examples
//!
//! ```no_run
//! use lexrel_gatekeeper::Gatekeeper;
//! use lexrel_remote::RelationClient;
//! use lexrel_store::{RelationStore, SqliteKv};
//!
//! # async fn demo() {
//! let kv = SqliteKv::open("lexrel.db").unwrap();
//! let remote = RelationClient::new("http://localhost:3000");
//! let mut store = RelationStore::open(kv, remote, Gatekeeper::default()).await;
//! store.create("cat", "dog", "opposite").await.unwrap();
//! # }
//! ```

#![warn(missing_docs)]

mod kv;

use std::collections::HashSet;
use std::fmt::Display;

use lexrel_domain::traits::{RelationService, SnapshotStore};
use lexrel_domain::{Relation, RelationId};
use lexrel_gatekeeper::{Gatekeeper, RejectionReason};
use thiserror::Error;

pub use kv::{MemoryKv, SqliteKv};

/// Snapshot key under which the serialized collection is persisted
pub const RELATIONS_KEY: &str = "relations";

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The gatekeeper rejected the candidate; the message is the
    /// advisory text for user display
    #[error("{0}")]
    Rejected(RejectionReason),

    /// Update/delete target id absent from the collection
    #[error("Relation not found: {0}")]
    NotFound(RelationId),

    /// Remote create/delete failed; local state was left unmodified
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// Snapshot write failed; local state was left unmodified
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A remote call for this id is still in flight
    #[error("Operation already in flight for relation {0}")]
    Busy(RelationId),

    /// Snapshot serialization error
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The canonical relation collection and its mutation protocol
///
/// Generic over the persistence and transport boundaries so tests can
/// inject in-memory fakes. All mutating operations take `&mut self`;
/// within one session the borrow checker serializes them, and the
/// per-id in-flight slot additionally rejects a mutation whose target
/// still has an unresolved remote call (a cancelled handler's request
/// may still be racing server-side).
pub struct RelationStore<K, R> {
    relations: Vec<Relation>,
    kv: K,
    remote: R,
    gatekeeper: Gatekeeper,
    in_flight: HashSet<RelationId>,
}

impl<K, R> RelationStore<K, R>
where
    K: SnapshotStore,
    K::Error: Display,
    R: RelationService,
    R::Error: Display,
{
    /// Best-effort bootstrap: persisted snapshot, then remote fetch,
    /// then empty. Failures are logged and never propagated.
    pub async fn open(kv: K, remote: R, gatekeeper: Gatekeeper) -> Self {
        let relations = match kv.get(RELATIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!("unreadable relation snapshot, refetching: {}", e);
                    Self::fetch_initial(&remote).await
                }
            },
            Ok(None) => Self::fetch_initial(&remote).await,
            Err(e) => {
                tracing::warn!("snapshot read failed, refetching: {}", e);
                Self::fetch_initial(&remote).await
            }
        };

        Self {
            relations,
            kv,
            remote,
            gatekeeper,
            in_flight: HashSet::new(),
        }
    }

    async fn fetch_initial(remote: &R) -> Vec<Relation> {
        match remote.fetch_all().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("initial remote fetch failed, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Current snapshot of the collection, in insertion order
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Look up a record by id
    pub fn get(&self, id: RelationId) -> Option<&Relation> {
        self.relations.iter().find(|r| r.id == id)
    }

    /// Mint and insert a new record
    ///
    /// The candidate is validated against the existing collection; a
    /// rejection carries the advisory reason and changes nothing. On
    /// acceptance the record is POSTed to the remote service, and only
    /// after the acknowledgement is the snapshot persisted and the
    /// collection updated.
    pub async fn create(
        &mut self,
        word1: &str,
        word2: &str,
        relation: &str,
    ) -> Result<Relation, StoreError> {
        let record = Relation::new(word1, word2, relation);

        let verdict = self.gatekeeper.check(&self.relations, &record);
        if let Some(reason) = verdict.reason {
            return Err(StoreError::Rejected(reason));
        }

        self.begin(record.id)?;
        let sent = self.remote.create(&record).await;
        self.finish(record.id);

        if let Err(e) = sent {
            tracing::warn!(id = %record.id, "remote create failed: {}", e);
            return Err(StoreError::RemoteUnavailable(e.to_string()));
        }

        let mut next = self.relations.clone();
        next.push(record.clone());
        self.commit(next)?;

        tracing::debug!(id = %record.id, "relation created");
        Ok(record)
    }

    /// Replace a record in place, preserving its position and id
    ///
    /// Purely local: the remote service exposes no update endpoint.
    /// Re-validation only runs when the gatekeeper is configured for it,
    /// with the edited record excluded from the existing set.
    pub fn update(
        &mut self,
        id: RelationId,
        word1: &str,
        word2: &str,
        relation: &str,
    ) -> Result<Relation, StoreError> {
        if self.in_flight.contains(&id) {
            return Err(StoreError::Busy(id));
        }

        let index = self
            .relations
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let edited = Relation::with_id(id, word1, word2, relation);

        if self.gatekeeper.revalidates_on_update() {
            let others: Vec<Relation> = self
                .relations
                .iter()
                .filter(|r| r.id != id)
                .cloned()
                .collect();
            let verdict = self.gatekeeper.check(&others, &edited);
            if let Some(reason) = verdict.reason {
                return Err(StoreError::Rejected(reason));
            }
        }

        let mut next = self.relations.clone();
        next[index] = edited.clone();
        self.commit(next)?;

        tracing::debug!(id = %id, "relation updated");
        Ok(edited)
    }

    /// Remove a record by id
    ///
    /// The remote delete must succeed before the record is removed
    /// locally and the snapshot rewritten.
    pub async fn delete(&mut self, id: RelationId) -> Result<(), StoreError> {
        let index = self
            .relations
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        self.begin(id)?;
        let sent = self.remote.delete(id).await;
        self.finish(id);

        if let Err(e) = sent {
            tracing::warn!(id = %id, "remote delete failed: {}", e);
            return Err(StoreError::RemoteUnavailable(e.to_string()));
        }

        let mut next = self.relations.clone();
        next.remove(index);
        self.commit(next)?;

        tracing::debug!(id = %id, "relation deleted");
        Ok(())
    }

    /// Persist `next` as the new snapshot, then swap it into memory.
    /// On failure memory is untouched.
    fn commit(&mut self, next: Vec<Relation>) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(&next)?;
        self.kv
            .set(RELATIONS_KEY, &snapshot)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        self.relations = next;
        Ok(())
    }

    /// Claim the in-flight slot for `id`
    fn begin(&mut self, id: RelationId) -> Result<(), StoreError> {
        if !self.in_flight.insert(id) {
            return Err(StoreError::Busy(id));
        }
        Ok(())
    }

    /// Release the in-flight slot for `id`
    fn finish(&mut self, id: RelationId) {
        self.in_flight.remove(&id);
    }
}
