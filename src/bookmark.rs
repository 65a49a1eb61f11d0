//! Bookmark records and their form draft.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    join_tags, parse_tags, record::restamp, require, suggest_title, validate_url, Record, Result,
};

/// A saved web link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    /// Always an absolute URL with a host
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "crate::record::iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::record::iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Form input for creating or editing a bookmark. `tags` is comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: String,
}

impl BookmarkDraft {
    pub fn new(url: impl Into<String>) -> Self {
        let mut draft = Self::default();
        draft.set_url(url);
        draft
    }

    /// Sets the URL, filling an empty title from the hostname when one can be derived.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        if self.title.is_empty() {
            if let Some(title) = suggest_title(&self.url) {
                self.title = title;
            }
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        validate_url(&self.url)
    }
}

impl Record for Bookmark {
    type Draft = BookmarkDraft;

    const SLOT: &'static str = "bookmarks";
    const KIND: &'static str = "Bookmark";

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

    fn from_draft(id: String, draft: &BookmarkDraft, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Bookmark {
            id,
            title: draft.title.clone(),
            url: draft.url.clone(),
            description: draft.description.clone(),
            tags: parse_tags(&draft.tags),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_update(&self, draft: &BookmarkDraft, now: DateTime<Utc>) -> Result<Self> {
        draft.validate()?;
        Ok(Bookmark {
            id: self.id.clone(),
            title: draft.title.clone(),
            url: draft.url.clone(),
            description: draft.description.clone(),
            tags: parse_tags(&draft.tags),
            created_at: self.created_at,
            updated_at: restamp(self.created_at, now),
        })
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.url.as_str(),
        ]
    }

    fn to_draft(&self) -> BookmarkDraft {
        BookmarkDraft {
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            tags: join_tags(&self.tags),
        }
    }
}
