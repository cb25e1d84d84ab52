//! Filtering, searching and sorting of the member roster.
//!
//! Everything here is a pure function of its inputs. The result borrows from
//! the member collection and is recomputed whenever it is needed.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{TrackerError, TrackerResult};
use crate::member::{Member, Priority, Status};

/// Either every value, or only one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("All"),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr<Err = TrackerError>> FromStr for Filter<T> {
    type Err = TrackerError;

    fn from_str(s: &str) -> TrackerResult<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

/// Roster ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "status")]
    Status,
    #[serde(rename = "priority")]
    Priority,
    #[serde(rename = "dueDate")]
    DueDate,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Status,
        SortKey::Priority,
        SortKey::DueDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Status => "status",
            SortKey::Priority => "priority",
            SortKey::DueDate => "dueDate",
        }
    }

    pub fn compare(&self, a: &Member, b: &Member) -> Ordering {
        match self {
            SortKey::Name => collate(&a.name, &b.name),
            SortKey::Status => a.status.cmp(&b.status),
            // High first
            SortKey::Priority => b.priority.cmp(&a.priority),
            // Dated members first, undated last
            SortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = TrackerError;

    fn from_str(s: &str) -> TrackerResult<Self> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        SortKey::ALL
            .into_iter()
            .find(|key| key.name().to_lowercase() == wanted)
            .ok_or_else(|| TrackerError::invalid("sort key", s, &SortKey::ALL.map(|k| k.name())))
    }
}

/// Accent- and case-insensitive ordering, so "Émile" sorts among the E's.
/// Lowercase then exact text break ties so the order is total.
fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// NFD with combining marks dropped, lowercased.
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The roster query: search text, filters and ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    pub search: String,
    pub status: Filter<Status>,
    pub priority: Filter<Priority>,
    pub sort: SortKey,
}

impl RosterQuery {
    pub fn apply<'a>(&self, members: &'a [Member]) -> Vec<&'a Member> {
        visible_members(members, &self.search, self.status, self.priority, self.sort)
    }
}

/// Members that pass the search and both filters, in `sort` order.
pub fn visible_members<'a>(
    members: &'a [Member],
    query: &str,
    status: Filter<Status>,
    priority: Filter<Priority>,
    sort: SortKey,
) -> Vec<&'a Member> {
    let mut visible: Vec<&Member> = members
        .iter()
        .filter(|m| m.matches_query(query))
        .filter(|m| status.accepts(&m.status))
        .filter(|m| priority.accepts(&m.priority))
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Number of members per status over the whole collection, in status order.
pub fn status_counts(members: &[Member]) -> [(Status, usize); 4] {
    Status::ALL.map(|status| {
        let count = members.iter().filter(|m| m.status == status).count();
        (status, count)
    })
}

/// One board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub members: Vec<&'a Member>,
}

impl BoardColumn<'_> {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Groups already-visible members by status. Every status gets a column,
/// and members keep their relative order.
pub fn board_columns<'a>(visible: &[&'a Member]) -> Vec<BoardColumn<'a>> {
    Status::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            members: visible
                .iter()
                .copied()
                .filter(|m| m.status == status)
                .collect(),
        })
        .collect()
}
