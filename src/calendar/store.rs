use std::collections::BTreeMap;

use chrono::{Local, NaiveTime};

use super::date_key;
use super::event::{Event, NewEvent};
use crate::error::{EventError, StorageError, StorageResult};
use crate::storage::{Storage, EVENTS_KEY};

/// Result of a mutation that was applied in memory. The write that followed
/// may have failed; the in-memory state stays authoritative either way.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub write_error: Option<StorageError>,
}

impl<T> Persisted<T> {
    fn new(value: T, write: StorageResult<()>) -> Self {
        Self {
            value,
            write_error: write.err(),
        }
    }
}

/// Date key -> entries on that day. A key is present only while its list is
/// non-empty.
#[derive(Debug, Default)]
pub struct EventStore {
    days: BTreeMap<String, Vec<Event>>,
    last_id: i64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the persisted store. Absent or unreadable data gives an empty
    /// store; the cause is logged and not returned.
    pub fn load(storage: &impl Storage) -> Self {
        let text = match storage.get(EVENTS_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::info!("no saved events, starting empty");
                return Self::new();
            }
            Err(e) => {
                log::warn!("error loading events: {e}");
                return Self::new();
            }
        };

        match Self::from_json(&text) {
            Ok(store) => {
                log::info!("loaded {} events across {} days", store.len(), store.days.len());
                store
            }
            Err(e) => {
                log::warn!("saved events are corrupt, starting empty: {e}");
                Self::new()
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut days: BTreeMap<String, Vec<Event>> = serde_json::from_str(text)?;
        days.retain(|_, events| !events.is_empty());
        let last_id = days.values().flatten().map(|e| e.id).max().unwrap_or(0);
        Ok(Self { days, last_id })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.days)
    }

    /// Serialize the whole store and write it. No retry on failure.
    pub fn persist(&self, storage: &impl Storage) -> StorageResult<()> {
        let text = self.to_json()?;
        storage.set(EVENTS_KEY, &text).inspect_err(|e| {
            log::error!("error saving events: {e}");
        })
    }

    pub fn add(
        &mut self,
        storage: &impl Storage,
        date_key: &str,
        new: NewEvent,
    ) -> Result<Persisted<Event>, EventError> {
        let date_key = date_key::canonicalize(date_key)?;

        let text = new.text.trim();
        if text.is_empty() {
            return Err(EventError::EmptyText);
        }
        let time = if new.is_all_day {
            String::new()
        } else {
            normalize_time(&new.time)?
        };

        let event = Event {
            id: self.next_id(),
            text: text.to_string(),
            category: new.category,
            time,
            is_all_day: new.is_all_day,
        };

        self.days
            .entry(date_key.clone())
            .or_default()
            .push(event.clone());
        log::debug!("event {} added for {date_key}", event.id);

        let write = self.persist(storage);
        Ok(Persisted::new(event, write))
    }

    /// Remove the entry with `id` from `date_key`. Returns `false` when there
    /// was nothing to remove, in which case nothing is written.
    pub fn delete(&mut self, storage: &impl Storage, date_key: &str, id: i64) -> Persisted<bool> {
        let date_key = date_key::canonicalize(date_key).unwrap_or_else(|_| date_key.to_string());
        let date_key = date_key.as_str();
        let Some(events) = self.days.get_mut(date_key) else {
            log::warn!("no events on {date_key}, cannot delete {id}");
            return Persisted::new(false, Ok(()));
        };

        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            log::warn!("event {id} not found on {date_key}");
            return Persisted::new(false, Ok(()));
        }

        if events.is_empty() {
            self.days.remove(date_key);
            log::debug!("removed date key {date_key}, now empty");
        }
        log::debug!("event {id} deleted from {date_key}");

        let write = self.persist(storage);
        Persisted::new(true, write)
    }

    pub fn events_on(&self, date_key: &str) -> &[Event] {
        self.days.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    #[allow(dead_code)]
    pub fn contains_date(&self, date_key: &str) -> bool {
        self.days.contains_key(date_key)
    }

    /// Days in ascending key order.
    pub fn days(&self) -> impl Iterator<Item = (&str, &[Event])> {
        self.days.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    // Millisecond timestamps, bumped past the last issued id so two adds in
    // the same millisecond still get distinct ids.
    fn next_id(&mut self) -> i64 {
        let id = Local::now().timestamp_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }
}

fn normalize_time(raw: &str) -> Result<String, EventError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(String::new());
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| EventError::InvalidTime(raw.to_string()))
}
