//! Load-on-open and save-on-change for the three persisted slices.
//!
//! Members, events and team notes live under independent keys. A slice that
//! is missing or cannot be parsed falls back to its built-in default; the
//! other slices are unaffected. Saves are best-effort and only logged on
//! failure.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::TrackerError;
use crate::event::{EventColor, TeamEvent};
use crate::id::RecordId;
use crate::member::{Member, Priority, Status};
use crate::store::KeyValueStore;

pub const MEMBERS_KEY: &str = "teamtracker-members";
pub const EVENTS_KEY: &str = "teamtracker-events";
pub const NOTES_KEY: &str = "teamtracker-notes";

/// Everything that is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub events: Vec<TeamEvent>,
    pub notes: String,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            members: default_members(),
            events: default_events(),
            notes: String::new(),
        }
    }
}

pub fn load<S: KeyValueStore>(store: &S) -> Snapshot {
    Snapshot {
        members: load_members(store),
        events: load_events(store),
        notes: load_notes(store),
    }
}

pub fn load_members<S: KeyValueStore>(store: &S) -> Vec<Member> {
    let members = load_json(store, MEMBERS_KEY).unwrap_or_else(default_members);
    dedupe_by_id(members, |m| &m.id, MEMBERS_KEY)
}

pub fn load_events<S: KeyValueStore>(store: &S) -> Vec<TeamEvent> {
    let events = load_json(store, EVENTS_KEY).unwrap_or_else(default_events);
    dedupe_by_id(events, |e| &e.id, EVENTS_KEY)
}

pub fn load_notes<S: KeyValueStore>(store: &S) -> String {
    store.get(NOTES_KEY).unwrap_or_default()
}

pub fn save_members<S: KeyValueStore>(store: &mut S, members: &[Member]) {
    save_json(store, MEMBERS_KEY, members);
}

pub fn save_events<S: KeyValueStore>(store: &mut S, events: &[TeamEvent]) {
    save_json(store, EVENTS_KEY, events);
}

pub fn save_notes<S: KeyValueStore>(store: &mut S, notes: &str) {
    if let Err(e) = store.set(NOTES_KEY, notes) {
        log::warn!("could not save {}: {}", NOTES_KEY, e);
    }
}

/// Writes every slice. Used when a store is first initialized.
pub fn save_all<S: KeyValueStore>(store: &mut S, snapshot: &Snapshot) {
    save_members(store, &snapshot.members);
    save_events(store, &snapshot.events);
    save_notes(store, &snapshot.notes);
}

fn load_json<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("stored {} is unreadable, using defaults: {}", key, e);
            None
        }
    }
}

fn save_json<S: KeyValueStore, T: Serialize + ?Sized>(store: &mut S, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(TrackerError::from)
        .and_then(|json| store.set(key, &json));

    match result {
        Ok(()) => log::debug!("saved {}", key),
        Err(e) => log::warn!("could not save {}: {}", key, e),
    }
}

/// Keep the first record for each id.
fn dedupe_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> &RecordId, key: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(id(record).clone());
            if !fresh {
                log::warn!("dropping duplicate id {} in {}", id(record), key);
            }
            fresh
        })
        .collect()
}

fn seed_date(month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, month, day)
}

pub fn default_members() -> Vec<Member> {
    vec![
        Member {
            id: RecordId::from(1u64),
            name: "Alex Chen".to_string(),
            task: "API integration".to_string(),
            status: Status::InProgress,
            priority: Priority::High,
            due_date: seed_date(1, 15),
            notes: "Waiting on backend team".to_string(),
        },
        Member {
            id: RecordId::from(2u64),
            name: "Sam Rivera".to_string(),
            task: "Design system updates".to_string(),
            status: Status::InProgress,
            priority: Priority::Medium,
            due_date: seed_date(1, 18),
            notes: String::new(),
        },
    ]
}

pub fn default_events() -> Vec<TeamEvent> {
    [
        (1u64, "Sprint Planning", 13, EventColor::Violet),
        (2u64, "Design Review", 16, EventColor::Blue),
    ]
    .into_iter()
    .filter_map(|(id, title, day, color)| {
        Some(TeamEvent {
            id: RecordId::from(id),
            title: title.to_string(),
            date: seed_date(1, day)?,
            color,
        })
    })
    .collect()
}
