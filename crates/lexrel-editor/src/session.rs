//! The editor session: form state plus the handlers behind it.

use std::fmt::Display;

use lexrel_domain::traits::{Notifier, RelationService, SnapshotStore};
use lexrel_domain::{FormFields, Relation, RelationId};
use lexrel_store::{RelationStore, StoreError};
use thiserror::Error;

/// Snapshot key for the add-form state
pub const ADD_FORM_KEY: &str = "add_form";

/// Snapshot key for the edit-form state
pub const EDIT_FORM_KEY: &str = "edit_form";

/// Editor-level errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// Store-level failure (rejection, not-found, remote, ...)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A form accessor was given a field name the form does not have
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// An edit submission without a record under edit
    #[error("No record is being edited")]
    NoActiveEdit,

    /// Form-state persistence failed
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// The editor session the view layer drives
///
/// Owns the relation store, both forms, and the id of the record under
/// edit. The second `SnapshotStore` handle mirrors form state; it may
/// point at the same database as the store's.
pub struct EditorSession<K, R, N> {
    store: RelationStore<K, R>,
    forms: K,
    add_form: FormFields,
    edit_form: FormFields,
    editing: Option<RelationId>,
    notifier: N,
}

impl<K, R, N> EditorSession<K, R, N>
where
    K: SnapshotStore,
    K::Error: Display,
    R: RelationService,
    R::Error: Display,
    N: Notifier,
{
    /// Build a session, resuming any persisted form state
    pub fn new(store: RelationStore<K, R>, forms: K, notifier: N) -> Self {
        let add_form = load_form(&forms, ADD_FORM_KEY);
        let edit_form = load_form(&forms, EDIT_FORM_KEY);

        Self {
            store,
            forms,
            add_form,
            edit_form,
            editing: None,
            notifier,
        }
    }

    /// Current snapshot of the collection, in insertion order
    pub fn relations(&self) -> &[Relation] {
        self.store.relations()
    }

    /// Id of the record currently under edit, if any
    pub fn editing(&self) -> Option<RelationId> {
        self.editing
    }

    /// Read a field of the add form by name
    pub fn add_field(&self, name: &str) -> Option<&str> {
        self.add_form.field(name)
    }

    /// Write a field of the add form by name
    pub fn set_add_field(&mut self, name: &str, value: &str) -> Result<(), EditorError> {
        if !self.add_form.set_field(name, value) {
            return Err(EditorError::UnknownField(name.to_string()));
        }
        self.persist_form(ADD_FORM_KEY)
    }

    /// Read a field of the edit form by name
    pub fn edit_field(&self, name: &str) -> Option<&str> {
        self.edit_form.field(name)
    }

    /// Write a field of the edit form by name
    pub fn set_edit_field(&mut self, name: &str, value: &str) -> Result<(), EditorError> {
        if !self.edit_form.set_field(name, value) {
            return Err(EditorError::UnknownField(name.to_string()));
        }
        self.persist_form(EDIT_FORM_KEY)
    }

    /// Submit the add form
    ///
    /// A validator rejection is pushed to the notification sink and
    /// returned; the form keeps its values so the user can fix them.
    /// On success the form is cleared.
    pub async fn submit_add(&mut self) -> Result<Relation, EditorError> {
        let FormFields {
            word1,
            word2,
            relation,
        } = self.add_form.clone();

        match self.store.create(&word1, &word2, &relation).await {
            Ok(record) => {
                self.add_form.clear();
                self.persist_form(ADD_FORM_KEY)?;
                Ok(record)
            }
            Err(StoreError::Rejected(reason)) => {
                self.notifier.notify_error(&reason.to_string());
                Err(StoreError::Rejected(reason).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Start editing a record: load its fields into the edit form
    pub fn begin_edit(&mut self, id: RelationId) -> Result<(), EditorError> {
        let record = self.store.get(id).ok_or(StoreError::NotFound(id))?;
        self.edit_form = FormFields::from(record);
        self.editing = Some(id);
        self.persist_form(EDIT_FORM_KEY)
    }

    /// Submit the edit form, replacing the record under edit in place
    pub async fn submit_edit(&mut self) -> Result<Relation, EditorError> {
        let id = self.editing.ok_or(EditorError::NoActiveEdit)?;
        let FormFields {
            word1,
            word2,
            relation,
        } = self.edit_form.clone();

        match self.store.update(id, &word1, &word2, &relation) {
            Ok(record) => {
                self.editing = None;
                self.edit_form.clear();
                self.persist_form(EDIT_FORM_KEY)?;
                Ok(record)
            }
            Err(StoreError::Rejected(reason)) => {
                self.notifier.notify_error(&reason.to_string());
                Err(StoreError::Rejected(reason).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Abandon the current edit; the form keeps its values
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Delete a record by id
    pub async fn delete(&mut self, id: RelationId) -> Result<(), EditorError> {
        self.store.delete(id).await?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(())
    }

    fn persist_form(&mut self, key: &str) -> Result<(), EditorError> {
        let form = match key {
            ADD_FORM_KEY => &self.add_form,
            _ => &self.edit_form,
        };
        let raw = serde_json::to_string(form)
            .map_err(|e| EditorError::Persistence(e.to_string()))?;
        self.forms
            .set(key, &raw)
            .map_err(|e| EditorError::Persistence(e.to_string()))
    }
}

fn load_form<K>(forms: &K, key: &str) -> FormFields
where
    K: SnapshotStore,
    K::Error: Display,
{
    match forms.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, "unreadable form state, starting blank: {}", e);
            FormFields::default()
        }),
        Ok(None) => FormFields::default(),
        Err(e) => {
            tracing::warn!(key, "form state read failed, starting blank: {}", e);
            FormFields::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use lexrel_gatekeeper::Gatekeeper;
    use lexrel_store::MemoryKv;

    /// Remote fake that accepts everything.
    #[derive(Default)]
    struct OkRemote;

    impl RelationService for OkRemote {
        type Error = String;

        async fn fetch_all(&self) -> Result<Vec<Relation>, Self::Error> {
            Ok(Vec::new())
        }

        async fn create(&self, record: &Relation) -> Result<Relation, Self::Error> {
            Ok(record.clone())
        }

        async fn delete(&self, _id: RelationId) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    /// Notifier that records every message it is handed.
    #[derive(Default, Clone)]
    struct RecordingNotifier(Rc<RefCell<Vec<String>>>);

    impl Notifier for RecordingNotifier {
        fn notify_error(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    async fn new_session(
    ) -> (EditorSession<MemoryKv, OkRemote, RecordingNotifier>, RecordingNotifier) {
        let store = RelationStore::open(MemoryKv::new(), OkRemote, Gatekeeper::default()).await;
        let notifier = RecordingNotifier::default();
        let session = EditorSession::new(store, MemoryKv::new(), notifier.clone());
        (session, notifier)
    }

    #[tokio::test]
    async fn test_add_flow() {
        let (mut session, notifier) = new_session().await;

        session.set_add_field("word1", "cat").unwrap();
        session.set_add_field("word2", "dog").unwrap();
        session.set_add_field("relation", "opposite").unwrap();

        let record = session.submit_add().await.unwrap();
        assert_eq!(record.word1, "cat");
        assert_eq!(session.relations().len(), 1);
        assert!(notifier.0.borrow().is_empty());

        // form cleared after a successful submit
        assert_eq!(session.add_field("word1"), Some(""));
    }

    #[tokio::test]
    async fn test_rejection_reaches_notifier_and_keeps_form() {
        let (mut session, notifier) = new_session().await;

        session.set_add_field("word1", "cat").unwrap();
        session.set_add_field("word2", "dog").unwrap();
        session.set_add_field("relation", "opposite").unwrap();
        session.submit_add().await.unwrap();

        session.set_add_field("word1", "dog").unwrap();
        session.set_add_field("word2", "cat").unwrap();
        session.set_add_field("relation", "opp2").unwrap();

        let err = session.submit_add().await.unwrap_err();
        assert!(matches!(err, EditorError::Store(StoreError::Rejected(_))));

        let messages = notifier.0.borrow();
        assert_eq!(
            messages.as_slice(),
            ["relation between those words already exists"]
        );
        drop(messages);

        // rejected form keeps its values, collection unchanged
        assert_eq!(session.add_field("word1"), Some("dog"));
        assert_eq!(session.relations().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_field_is_an_error() {
        let (mut session, _) = new_session().await;
        let err = session.set_add_field("word3", "bird").unwrap_err();
        assert!(matches!(err, EditorError::UnknownField(name) if name == "word3"));
    }

    #[tokio::test]
    async fn test_edit_flow() {
        let (mut session, _) = new_session().await;

        session.set_add_field("word1", "sun").unwrap();
        session.set_add_field("word2", "moon").unwrap();
        session.set_add_field("relation", "opposite").unwrap();
        let record = session.submit_add().await.unwrap();

        session.begin_edit(record.id).unwrap();
        assert_eq!(session.editing(), Some(record.id));
        // edit form was loaded from the record
        assert_eq!(session.edit_field("word1"), Some("sun"));

        session.set_edit_field("relation", "celestial").unwrap();
        let edited = session.submit_edit().await.unwrap();

        assert_eq!(edited.id, record.id);
        assert_eq!(edited.relation, "celestial");
        assert_eq!(session.editing(), None);
    }

    #[tokio::test]
    async fn test_submit_edit_without_begin() {
        let (mut session, _) = new_session().await;
        let err = session.submit_edit().await.unwrap_err();
        assert!(matches!(err, EditorError::NoActiveEdit));
    }

    #[tokio::test]
    async fn test_cancel_edit() {
        let (mut session, _) = new_session().await;

        session.set_add_field("word1", "sun").unwrap();
        session.set_add_field("word2", "moon").unwrap();
        session.set_add_field("relation", "opposite").unwrap();
        let record = session.submit_add().await.unwrap();

        session.begin_edit(record.id).unwrap();
        session.cancel_edit();
        assert_eq!(session.editing(), None);

        // record untouched
        assert_eq!(session.relations()[0], record);
    }

    #[tokio::test]
    async fn test_delete_clears_active_edit() {
        let (mut session, _) = new_session().await;

        session.set_add_field("word1", "sun").unwrap();
        session.set_add_field("word2", "moon").unwrap();
        session.set_add_field("relation", "opposite").unwrap();
        let record = session.submit_add().await.unwrap();

        session.begin_edit(record.id).unwrap();
        session.delete(record.id).await.unwrap();

        assert!(session.relations().is_empty());
        assert_eq!(session.editing(), None);
    }

    #[tokio::test]
    async fn test_form_state_resumes_from_persistence() {
        let store = RelationStore::open(MemoryKv::new(), OkRemote, Gatekeeper::default()).await;
        let forms = MemoryKv::new().with_entry(ADD_FORM_KEY, r#"{"word1":"ca","word2":"","relation":""}"#);
        let session = EditorSession::new(store, forms, RecordingNotifier::default());

        assert_eq!(session.add_field("word1"), Some("ca"));
    }
}
