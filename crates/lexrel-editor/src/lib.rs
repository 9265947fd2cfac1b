//! lexrel Editor Session
//!
//! The surface the view layer binds to: an add form and an edit form
//! with by-name field access, submit/cancel handlers that drive the
//! relation store, and a notification sink that surfaces validator
//! rejections.
//!
//! Form state is mirrored to the persistence layer on every field
//! write, so a restarted session resumes with a half-typed form intact.

#![warn(missing_docs)]

mod notify;
mod session;

pub use notify::{LogNotifier, NullNotifier};
pub use session::{EditorError, EditorSession, ADD_FORM_KEY, EDIT_FORM_KEY};
