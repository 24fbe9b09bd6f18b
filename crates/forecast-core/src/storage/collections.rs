//! Typed JSON documents on top of a `KeyValueStore`.
//!
//! A collection is a JSON array stored under one key. A missing key reads as
//! an empty collection; a present but unparsable value is an error and is
//! never overwritten silently.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::database::KeyValueStore;
use crate::calendar::{insert_missing, CalendarEvent};
use crate::error::StorageError;
use crate::plan::DailyPlan;

pub const PLANS_KEY: &str = "force-forecast-plans";
pub const CALENDAR_KEY: &str = "force-forecast-calendar";

/// Records addressable by a string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for DailyPlan {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct JsonCollection<'a, S: KeyValueStore + ?Sized, T> {
    store: &'a S,
    key: &'static str,
    _record: PhantomData<T>,
}

pub type PlanStore<'a, S> = JsonCollection<'a, S, DailyPlan>;
pub type EventStore<'a, S> = JsonCollection<'a, S, CalendarEvent>;

impl<'a, S: KeyValueStore + ?Sized> PlanStore<'a, S> {
    pub fn plans(store: &'a S) -> Self {
        JsonCollection::new(store, PLANS_KEY)
    }

    /// Newest plan by creation time.
    pub fn latest(&self) -> Result<Option<DailyPlan>, StorageError> {
        Ok(self.list()?.into_iter().max_by_key(|p| p.created_at))
    }
}

impl<'a, S: KeyValueStore + ?Sized> EventStore<'a, S> {
    pub fn events(store: &'a S) -> Self {
        JsonCollection::new(store, CALENDAR_KEY)
    }

    /// Store only events whose id is not already present.
    pub fn insert_missing(&self, candidates: Vec<CalendarEvent>) -> Result<usize, StorageError> {
        let mut events = self.list()?;
        let added = insert_missing(&mut events, candidates);
        if added > 0 {
            self.replace_all(&events)?;
        }
        Ok(added)
    }
}

impl<'a, S, T> JsonCollection<'a, S, T>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + DeserializeOwned + Identified,
{
    pub fn new(store: &'a S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    pub fn list(&self) -> Result<Vec<T>, StorageError> {
        Ok(load_snapshot(self.store, self.key)?.unwrap_or_default())
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Replace the record with the same id in place, or append it.
    pub fn upsert(&self, record: T) -> Result<(), StorageError> {
        let mut records = self.list()?;
        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => records[index] = record,
            None => records.push(record),
        }
        self.replace_all(&records)
    }

    /// Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.replace_all(&records)?;
        Ok(true)
    }

    pub fn replace_all(&self, records: &[T]) -> Result<(), StorageError> {
        save_snapshot(self.store, self.key, &records)?;
        info!(key = self.key, count = records.len(), "saved collection");
        Ok(())
    }
}

/// Read one JSON document. `None` when the key is absent.
pub fn load_snapshot<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => {
            debug!(key, "no stored value");
            Ok(None)
        }
    }
}

pub fn save_snapshot<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Priority, ScheduleItem};
    use crate::storage::Database;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn plan(id: &str, hour: u32) -> DailyPlan {
        DailyPlan {
            id: id.into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            prompt: "Win".into(),
            schedule: vec![ScheduleItem {
                time: "09:00".into(),
                task: "Work".into(),
                priority: Priority::High,
            }],
            goals: vec!["a".into(), "b".into(), "c".into()],
            journal_prompt: "?".into(),
            journal_entry: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn missing_key_is_empty() {
        let db = Database::open_memory().unwrap();
        assert!(PlanStore::plans(&db).list().unwrap().is_empty());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let db = Database::open_memory().unwrap();
        let store = PlanStore::plans(&db);
        store.upsert(plan("a", 1)).unwrap();
        store.upsert(plan("b", 2)).unwrap();
        let mut edited = plan("a", 1);
        edited.journal_entry = "done".into();
        store.upsert(edited).unwrap();

        let plans = store.list().unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].id, "a");
        assert_eq!(plans[0].journal_entry, "done");
    }

    #[test]
    fn delete_reports_removal() {
        let db = Database::open_memory().unwrap();
        let store = PlanStore::plans(&db);
        store.upsert(plan("a", 1)).unwrap();
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn latest_by_created_at() {
        let db = Database::open_memory().unwrap();
        let store = PlanStore::plans(&db);
        store.upsert(plan("late", 9)).unwrap();
        store.upsert(plan("early", 3)).unwrap();
        assert_eq!(store.latest().unwrap().unwrap().id, "late");
    }

    #[test]
    fn corrupt_value_is_an_error() {
        let db = Database::open_memory().unwrap();
        db.set(PLANS_KEY, "{not json").unwrap();
        let err = PlanStore::plans(&db).list().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { ref key, .. } if key == PLANS_KEY));
        // Untouched.
        assert_eq!(db.get(PLANS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn event_store_skips_existing_ids() {
        let db = Database::open_memory().unwrap();
        let store = EventStore::events(&db);
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let now = Utc::now();
        let derived = crate::calendar::events_from_plan(&plan("p", 1), day, now);
        assert_eq!(store.insert_missing(derived.clone()).unwrap(), 1);
        assert_eq!(store.insert_missing(derived).unwrap(), 0);
        assert_eq!(store.list().unwrap().len(), 1);
    }
}
