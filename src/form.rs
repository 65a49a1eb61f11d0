//! Form workflow for creating and editing records.
//!
//! A form is either closed, open for a new record, or open on an existing
//! one. Submitting from `Creating` calls `create`, from `Editing` calls
//! `update`; a successful submit closes the form, a failed one keeps the
//! draft so the user can fix it.

use crate::{CollectionStore, Record, Result, ShelfError, SlotStorage};

pub enum FormState<R: Record> {
    Idle,
    Creating(R::Draft),
    Editing { id: String, draft: R::Draft },
}

impl<R: Record> Default for FormState<R> {
    fn default() -> Self {
        FormState::Idle
    }
}

impl<R: Record> FormState<R> {
    pub fn creating(draft: R::Draft) -> Self {
        FormState::Creating(draft)
    }

    /// Opens the form on `record`, pre-filled with its current values.
    pub fn editing(record: &R) -> Self {
        FormState::Editing {
            id: record.id().to_string(),
            draft: record.to_draft(),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FormState::Idle)
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match self {
            FormState::Idle => None,
            FormState::Creating(draft) | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match self {
            FormState::Idle => None,
            FormState::Creating(draft) | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn cancel(&mut self) {
        *self = FormState::Idle;
    }

    pub fn submit<S: SlotStorage>(&mut self, store: &mut CollectionStore<R, S>) -> Result<R> {
        let result = match self {
            FormState::Idle => {
                return Err(ShelfError::ApplicationError {
                    message: format!("No {} form is open", R::KIND.to_lowercase()),
                })
            }
            FormState::Creating(draft) => store.create(draft),
            FormState::Editing { id, draft } => store.update(id, draft),
        };

        if result.is_ok() {
            *self = FormState::Idle;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bookmark, BookmarkDraft, MemoryStorage, Note, NoteDraft};

    #[test]
    fn create_then_edit_round_trip() {
        let mut store: CollectionStore<Note, _> = CollectionStore::open(MemoryStorage::new());

        let mut form = FormState::<Note>::creating(NoteDraft::new("Idea", "ship it", "work"));
        let note = form.submit(&mut store).unwrap();
        assert!(form.is_idle());

        let mut form = FormState::editing(&note);
        assert_eq!(form.draft().unwrap().tags, "work");
        form.draft_mut().unwrap().tags = "work, later".into();
        let edited = form.submit(&mut store).unwrap();

        assert_eq!(edited.id, note.id);
        assert_eq!(edited.tags, vec!["work", "later"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_submit_keeps_draft() {
        let mut store: CollectionStore<Bookmark, _> = CollectionStore::open(MemoryStorage::new());
        let mut form = FormState::<Bookmark>::creating(BookmarkDraft::new("not a url").with_title("x"));

        assert!(form.submit(&mut store).is_err());
        assert!(!form.is_idle());

        form.draft_mut().unwrap().set_url("https://example.com");
        assert!(form.submit(&mut store).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn idle_form_cannot_submit() {
        let mut store: CollectionStore<Note, _> = CollectionStore::open(MemoryStorage::new());
        let mut form = FormState::<Note>::default();
        assert!(matches!(
            form.submit(&mut store),
            Err(ShelfError::ApplicationError { .. })
        ));

        let mut form = FormState::<Note>::creating(NoteDraft::default());
        form.cancel();
        assert!(form.is_idle());
        assert!(form.draft().is_none());
    }
}
