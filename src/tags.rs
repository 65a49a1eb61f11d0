use std::collections::BTreeSet;

use crate::Record;

/// Every distinct tag in use across `records`, recomputed on each call.
pub fn distinct_tags<R: Record>(records: &[R]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|record| record.tags())
        .filter(|tag| !tag.is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{Note, NoteDraft};

    #[test]
    fn union_without_duplicates_or_blanks() {
        let mut notes = vec![
            Note::from_draft("1".into(), &NoteDraft::new("a", "b", "work, home"), Utc::now())
                .unwrap(),
            Note::from_draft("2".into(), &NoteDraft::new("c", "d", "home,,errands"), Utc::now())
                .unwrap(),
        ];
        // Hand-edited slot content can carry blanks.
        notes[1].tags.push(String::new());

        let tags = distinct_tags(&notes);
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["errands", "home", "work"]
        );
    }

    #[test]
    fn empty_collection_has_no_tags() {
        assert!(distinct_tags::<Note>(&[]).is_empty());
    }
}
