//! Note records and their form draft.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{join_tags, parse_tags, record::restamp, require, Record, Result};

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier for the note
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Tags for organization
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the note was created
    #[serde(with = "crate::record::iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(with = "crate::record::iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Form input for creating or editing a note. `tags` is comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: tags.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("content", &self.content)
    }
}

impl Record for Note {
    type Draft = NoteDraft;

    const SLOT: &'static str = "notes";
    const KIND: &'static str = "Note";

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn from_draft(id: String, draft: &NoteDraft, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Note {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: parse_tags(&draft.tags),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_update(&self, draft: &NoteDraft, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Note {
            id: self.id.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: parse_tags(&draft.tags),
            created_at: self.created_at,
            updated_at: restamp(self.created_at, now),
        })
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }

    fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: join_tags(&self.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{validate_for_create, ShelfError};

    #[test]
    fn create_normalizes_tags_and_stamps_both_times() {
        let now = Utc::now();
        let note = Note::from_draft(
            "1".into(),
            &NoteDraft::new("Groceries", "milk, eggs", " home ,errands,, home"),
            now,
        )
        .unwrap();

        assert_eq!(note.tags, vec!["home", "errands", "home"]);
        assert_eq!(note.created_at, now);
        assert_eq!(note.updated_at, now);
    }

    #[test]
    fn blank_title_or_content_is_missing() {
        let err = validate_for_create::<Note>(&NoteDraft::new("  ", "body", "")).unwrap_err();
        assert!(matches!(err, ShelfError::MissingRequiredField { field: "title" }));

        let err = validate_for_create::<Note>(&NoteDraft::new("Title", "\n", "")).unwrap_err();
        assert!(matches!(err, ShelfError::MissingRequiredField { field: "content" }));
    }

    #[test]
    fn update_keeps_identity_and_restamps() {
        let created = Utc::now() - Duration::hours(1);
        let note = Note::from_draft("42".into(), &NoteDraft::new("a", "b", "x"), created).unwrap();

        let later = created + Duration::minutes(5);
        let updated = note
            .apply_update(&NoteDraft::new("new", "text", ""), later)
            .unwrap();

        assert_eq!(updated.id, "42");
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.title, "new");
        assert!(updated.tags.is_empty());
    }

    #[test]
    fn update_never_moves_before_creation() {
        let created = Utc::now();
        let note = Note::from_draft("1".into(), &NoteDraft::new("a", "b", ""), created).unwrap();
        let updated = note
            .apply_update(&NoteDraft::new("a", "c", ""), created - Duration::seconds(30))
            .unwrap();
        assert_eq!(updated.updated_at, created);
    }

    #[test]
    fn draft_prefill_joins_tags() {
        let note =
            Note::from_draft("1".into(), &NoteDraft::new("a", "b", "x,y"), Utc::now()).unwrap();
        assert_eq!(note.to_draft(), NoteDraft::new("a", "b", "x, y"));
    }

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let note = Note::from_draft("7".into(), &NoteDraft::new("t", "c", "a"), Utc::now()).unwrap();
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["tags"], serde_json::json!(["a"]));
    }
}
