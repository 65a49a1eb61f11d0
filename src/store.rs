use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::{record, Record, Result, ShelfError, SlotStorage};

/// Owns the authoritative, ordered list of one record kind and mediates
/// every change to it.
///
/// Every mutation rewrites the whole collection to the record kind's slot
/// before returning. If that write fails the in-memory change is undone, so
/// the list always matches what is durable.
pub struct CollectionStore<R: Record, S: SlotStorage> {
    storage: S,
    records: Vec<R>,
    /// Highest numeric id issued or loaded; ids are never handed out twice.
    last_id: i64,
}

impl<R: Record, S: SlotStorage> CollectionStore<R, S> {
    /// Creates a store over `storage` and loads whatever the slot holds.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            records: Vec::new(),
            last_id: 0,
        };
        store.load();
        store
    }

    /// Re-reads the slot. A missing or unreadable slot yields an empty
    /// collection rather than an error.
    pub fn load(&mut self) -> &[R] {
        self.records = match self.storage.read(R::SLOT) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<R>>(&text) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Slot '{}' is not valid, starting empty: {}", R::SLOT, e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("Slot '{}' is empty", R::SLOT);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read slot '{}', starting empty: {}", R::SLOT, e);
                Vec::new()
            }
        };

        let loaded_max = self
            .records
            .iter()
            .filter_map(|r| r.id().parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        self.last_id = self.last_id.max(loaded_max);

        info!("Loaded {} {} records", self.records.len(), R::KIND);
        &self.records
    }

    /// The current snapshot in insertion order.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates `draft`, appends the new record and persists.
    pub fn create(&mut self, draft: &R::Draft) -> Result<R> {
        let now = record::now();
        let id = self.next_id(now);
        let record = R::from_draft(id, draft, now)?;

        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        info!("Created {} {}", R::KIND, record.id());
        Ok(record)
    }

    /// Replaces the editable fields of record `id` in place and persists.
    pub fn update(&mut self, id: &str, draft: &R::Draft) -> Result<R> {
        let index = self
            .position(id)
            .ok_or_else(|| ShelfError::NotFound {
                kind: R::KIND,
                id: id.to_string(),
            })?;

        let updated = self.records[index].apply_update(draft, record::now())?;
        let previous = std::mem::replace(&mut self.records[index], updated.clone());
        if let Err(e) = self.persist() {
            self.records[index] = previous;
            return Err(e);
        }

        info!("Updated {} {}", R::KIND, id);
        Ok(updated)
    }

    /// Removes record `id` if present and persists. Deleting an unknown id is
    /// not an error; the removed record is returned when there was one.
    pub fn delete(&mut self, id: &str) -> Result<Option<R>> {
        let removed = self.position(id).map(|index| (index, self.records.remove(index)));

        if let Err(e) = self.persist() {
            if let Some((index, record)) = removed {
                self.records.insert(index, record);
            }
            return Err(e);
        }

        match &removed {
            Some(_) => info!("Deleted {} {}", R::KIND, id),
            None => debug!("Delete of unknown {} {} ignored", R::KIND, id),
        }
        Ok(removed.map(|(_, record)| record))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Millisecond timestamp id, always above every id issued before, so an
    /// id freed by a delete is never reused.
    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis().max(self.last_id + 1);
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    fn persist(&mut self) -> Result<()> {
        let text = serde_json::to_string(&self.records)?;
        self.storage.write(R::SLOT, &text)?;
        debug!("Persisted {} {} records", self.records.len(), R::KIND);
        Ok(())
    }
}
