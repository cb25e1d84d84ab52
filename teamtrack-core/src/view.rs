//! Transient UI state: which view is shown, form drafts, the pending edit.
//!
//! None of this is persisted.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthCursor;
use crate::error::{TrackerError, TrackerResult};
use crate::event::EventDraft;
use crate::id::RecordId;
use crate::member::{Member, MemberDraft, MemberUpdate};
use crate::roster::RosterQuery;

/// Top-level display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Team,
    Calendar,
}

/// Presentation strategy for the member roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Cards,
    Table,
    Board,
    Compact,
}

impl Layout {
    pub const ALL: [Layout; 4] = [Layout::Cards, Layout::Table, Layout::Board, Layout::Compact];

    pub fn id(&self) -> &'static str {
        match self {
            Layout::Cards => "cards",
            Layout::Table => "table",
            Layout::Board => "board",
            Layout::Compact => "compact",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Layout {
    type Err = TrackerError;

    fn from_str(s: &str) -> TrackerResult<Self> {
        let wanted = s.trim().to_lowercase();
        Layout::ALL
            .into_iter()
            .find(|layout| layout.id() == wanted)
            .ok_or_else(|| TrackerError::invalid("layout", s, &Layout::ALL.map(|l| l.id())))
    }
}

/// A form that can be opened, filled in and submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form<D> {
    pub open: bool,
    pub draft: D,
}

impl<D: Default> Form<D> {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close without submitting. The draft is kept for the next opening.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Close after a successful submit and start over with an empty draft.
    pub fn reset(&mut self) {
        self.open = false;
        self.draft = D::default();
    }
}

/// A detached copy of a member being edited.
///
/// Changes to `draft` do not reach the collection until committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    original_id: RecordId,
    draft: Member,
}

impl PendingEdit {
    pub fn of(member: &Member) -> Self {
        PendingEdit {
            original_id: member.id.clone(),
            draft: member.clone(),
        }
    }

    pub fn original_id(&self) -> &RecordId {
        &self.original_id
    }

    pub fn draft(&self) -> &Member {
        &self.draft
    }

    pub fn apply(&mut self, update: MemberUpdate) {
        self.draft.apply(update);
    }

    pub fn into_member(self) -> Member {
        self.draft
    }
}

/// Everything about the current presentation that is not domain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub view: View,
    pub layout: Layout,
    pub roster: RosterQuery,
    pub month: MonthCursor,
    pub member_form: Form<MemberDraft>,
    pub event_form: Form<EventDraft>,
    pub pending_edit: Option<PendingEdit>,
}

impl ViewState {
    /// Initial state with the calendar on the month containing `today`.
    pub fn starting(today: NaiveDate) -> Self {
        ViewState {
            view: View::default(),
            layout: Layout::default(),
            roster: RosterQuery::default(),
            month: MonthCursor::containing(today),
            member_form: Form::default(),
            event_form: Form::default(),
            pending_edit: None,
        }
    }
}
