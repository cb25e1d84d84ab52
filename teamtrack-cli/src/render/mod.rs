//! Terminal rendering for teamtrack types.
//!
//! Every roster layout reads the same visible-member list and only differs
//! in arrangement. Text is padded to width before it is colored, so ANSI
//! codes never break alignment.

pub mod board;
pub mod calendar;
pub mod cards;
pub mod compact;
pub mod table;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use teamtrack_core::Tracker;
use teamtrack_core::event::{EventColor, TeamEvent};
use teamtrack_core::member::{Priority, Status};
use teamtrack_core::roster::{Filter, RosterQuery};
use teamtrack_core::store::KeyValueStore;
use teamtrack_core::view::{Layout, View};

pub const NO_MEMBERS_FOUND: &str = "No team members found";

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Status {
    fn render(&self) -> String {
        paint_status(*self, self.label())
    }
}

impl Render for Priority {
    fn render(&self) -> String {
        paint_priority(*self, &format!("{} {}", priority_glyph(*self), self.label()))
    }
}

impl Render for TeamEvent {
    fn render(&self) -> String {
        format!(
            "{} {}  {}  {}",
            paint_event("●", self.color),
            self.date,
            self.title,
            self.id.short().dimmed()
        )
    }
}

pub fn paint_status(status: Status, text: &str) -> String {
    match status {
        Status::NotStarted => text.dimmed().to_string(),
        Status::InProgress => text.blue().to_string(),
        Status::Blocked => text.red().to_string(),
        Status::Done => text.green().to_string(),
    }
}

pub fn paint_priority(priority: Priority, text: &str) -> String {
    match priority {
        Priority::High => text.red().to_string(),
        Priority::Medium => text.yellow().to_string(),
        Priority::Low => text.dimmed().to_string(),
    }
}

pub fn paint_event(text: &str, color: EventColor) -> String {
    match color {
        EventColor::Violet => text.magenta().to_string(),
        EventColor::Blue => text.blue().to_string(),
        EventColor::Emerald => text.green().to_string(),
        EventColor::Red => text.red().to_string(),
        EventColor::Amber => text.yellow().to_string(),
    }
}

pub fn priority_glyph(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔥",
        Priority::Medium => "⚡",
        Priority::Low => "○",
    }
}

/// Avatar text: first letters of the first two words of the name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Left-align `text` in `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn due_text(due: Option<NaiveDate>) -> String {
    due.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Whatever the tracker's current view and layout call for.
pub fn screen<S: KeyValueStore>(tracker: &Tracker<S>, today: NaiveDate) -> String {
    match tracker.view().view {
        View::Team => team_screen(tracker),
        View::Calendar => calendar_screen(tracker, today),
    }
}

fn team_screen<S: KeyValueStore>(tracker: &Tracker<S>) -> String {
    let query = &tracker.view().roster;
    let shown = tracker.visible_members().len();

    let notes = if tracker.notes().is_empty() {
        "No team notes yet".dimmed().to_string()
    } else {
        tracker.notes().to_string()
    };

    [
        "Team".bold().to_string(),
        stats(&tracker.status_counts(), query.status),
        summary(shown, tracker.members().len(), query).dimmed().to_string(),
        String::new(),
        roster(tracker),
        String::new(),
        "Team Notes".bold().to_string(),
        notes,
    ]
    .join("\n")
}

fn calendar_screen<S: KeyValueStore>(tracker: &Tracker<S>, today: NaiveDate) -> String {
    [
        calendar::render(tracker.view().month, tracker.events(), tracker.members(), today),
        String::new(),
        "All Events".bold().to_string(),
        event_list(&tracker.events_by_date()),
    ]
    .join("\n")
}

/// The visible roster in the tracker's current layout.
pub fn roster<S: KeyValueStore>(tracker: &Tracker<S>) -> String {
    match tracker.view().layout {
        Layout::Cards => cards::render(&tracker.visible_members()),
        Layout::Table => table::render(&tracker.visible_members()),
        Layout::Board => board::render(&tracker.board_columns()),
        Layout::Compact => compact::render(&tracker.visible_members()),
    }
}

/// One line describing what the roster is showing.
fn summary(shown: usize, total: usize, query: &RosterQuery) -> String {
    let mut parts = vec![format!("Showing {shown} of {total}")];
    if !query.search.is_empty() {
        parts.push(format!("matching \"{}\"", query.search));
    }
    if let Filter::Only(status) = query.status {
        parts.push(format!("status: {status}"));
    }
    if let Filter::Only(priority) = query.priority {
        parts.push(format!("priority: {priority}"));
    }
    parts.push(format!("sorted by {}", query.sort.name()));
    parts.join(" · ")
}

/// The per-status counts strip; the active status filter is marked.
pub fn stats(counts: &[(Status, usize)], active: Filter<Status>) -> String {
    counts
        .iter()
        .map(|(status, count)| {
            let cell = format!("{} {}", status.label(), count);
            if active == Filter::Only(*status) {
                format!("{} {}", "▸".bold(), paint_status(*status, &cell).bold())
            } else {
                format!("  {}", paint_status(*status, &cell))
            }
        })
        .collect::<Vec<_>>()
        .join("   ")
}

/// Date-ordered list of events.
pub fn event_list(events: &[&TeamEvent]) -> String {
    if events.is_empty() {
        return "No events yet".dimmed().to_string();
    }
    events
        .iter()
        .map(|e| e.render())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use teamtrack_core::id::RecordId;
    use teamtrack_core::member::{Member, Priority, Status};

    pub fn member(name: &str, task: &str, status: Status, priority: Priority) -> Member {
        Member {
            id: RecordId::from(name.to_lowercase().replace(' ', "-")),
            name: name.to_string(),
            task: task.to_string(),
            status,
            priority,
            due_date: None,
            notes: String::new(),
        }
    }
}
