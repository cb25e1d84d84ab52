//! Calendar-anchored team events.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::id::RecordId;

/// Color tag of an event, from a fixed palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    #[default]
    #[serde(alias = "bg-violet-500")]
    Violet,
    #[serde(alias = "bg-blue-500")]
    Blue,
    #[serde(alias = "bg-emerald-500")]
    Emerald,
    #[serde(alias = "bg-red-500")]
    Red,
    #[serde(alias = "bg-amber-500")]
    Amber,
}

impl EventColor {
    pub const ALL: [EventColor; 5] = [
        EventColor::Violet,
        EventColor::Blue,
        EventColor::Emerald,
        EventColor::Red,
        EventColor::Amber,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventColor::Violet => "violet",
            EventColor::Blue => "blue",
            EventColor::Emerald => "emerald",
            EventColor::Red => "red",
            EventColor::Amber => "amber",
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventColor {
    type Err = TrackerError;

    fn from_str(s: &str) -> TrackerResult<Self> {
        let wanted = s.trim().to_lowercase();
        EventColor::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| TrackerError::invalid("color", s, &EventColor::ALL.map(|c| c.name())))
    }
}

/// A team activity pinned to a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEvent {
    pub id: RecordId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub color: EventColor,
}

impl TeamEvent {
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// Field values for an event that does not exist yet.
///
/// The date stays optional until submit so an unfinished form can be held.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub color: EventColor,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        EventDraft {
            title: title.into(),
            date: Some(date),
            color: EventColor::default(),
        }
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    /// Builds the event, or `None` when the title is empty or no date is set.
    pub fn into_event(self, id: RecordId) -> Option<TeamEvent> {
        if self.title.is_empty() {
            return None;
        }
        let date = self.date?;
        Some(TeamEvent {
            id,
            title: self.title,
            date,
            color: self.color,
        })
    }
}
