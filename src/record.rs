//! The capability set shared by every record kind a collection can hold.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::Result;

/// A record that can live in a [`CollectionStore`](crate::CollectionStore).
///
/// `Note` and `Bookmark` implement this once each; the store, the filter and
/// the tag index are written against the trait only.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Unvalidated form input for this record kind.
    type Draft;

    /// Key of the durable slot holding the serialized collection.
    const SLOT: &'static str;

    /// Human readable name used in messages, e.g. "Note".
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn tags(&self) -> &[String];

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Validates `draft` and builds a fresh record stamped with `now`.
    fn from_draft(id: String, draft: &Self::Draft, now: DateTime<Utc>) -> Result<Self>;

    /// Validates `draft` and returns a copy of `self` with the editable fields
    /// replaced. `id` and `created_at` are carried over.
    fn apply_update(&self, draft: &Self::Draft, now: DateTime<Utc>) -> Result<Self>;

    /// Fields the free-text search looks at.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Pre-fills a draft from this record for editing.
    fn to_draft(&self) -> Self::Draft;
}

/// Validates a draft into a new record with an id derived from the current instant.
///
/// Collection stores pick their own id so it stays unique; this is the
/// standalone check a form can run before submitting.
pub fn validate_for_create<R: Record>(draft: &R::Draft) -> Result<R> {
    let now = now();
    R::from_draft(now.timestamp_millis().to_string(), draft, now)
}

/// Update timestamp that never precedes `created_at`, even if the clock went backwards.
pub(crate) fn restamp(created_at: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(created_at)
}

/// The current instant at the millisecond precision records are stored with.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Serializes timestamps as `2024-01-01T12:00:00.123Z`.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{Note, NoteDraft};

    #[test]
    fn timestamps_are_written_with_milliseconds() {
        let at = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let note = Note::from_draft("1".into(), &NoteDraft::new("t", "c", ""), at).unwrap();

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");
        assert_eq!(json["updatedAt"], "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn finer_timestamps_still_load() {
        let json = r#"{"id":"1","title":"t","content":"c","tags":[],
            "createdAt":"2023-11-14T22:13:20.123456789Z","updatedAt":"2023-11-14T22:13:20.5Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.created_at.timestamp_subsec_nanos(), 123_456_789);
        assert_eq!(note.updated_at.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn now_has_no_sub_millisecond_part() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
