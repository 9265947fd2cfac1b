//! lexrel Remote Transport
//!
//! HTTP client for the resource-oriented relation service:
//!
//! - `GET {base}/items` - fetch the full collection
//! - `POST {base}/items` - create a record (echoed back)
//! - `DELETE {base}/items/{id}` - delete a record
//!
//! The base path is configured externally; transport failures surface
//! as a generic [`RemoteError`] to the caller.

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{RelationClient, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use error::RemoteError;
