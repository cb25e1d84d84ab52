//! The tracker: owner of all team state and the only way to change it.
//!
//! Every mutation that changes a persisted slice writes that slice back to
//! the store immediately. Rejected input and unknown ids are no-ops.

use chrono::NaiveDate;

use crate::calendar::{self, DayAgenda, MonthCursor};
use crate::event::{EventDraft, TeamEvent};
use crate::id::RecordId;
use crate::member::{Member, MemberDraft, MemberUpdate, Status};
use crate::persistence;
use crate::roster::{self, BoardColumn, Filter};
use crate::store::KeyValueStore;
use crate::view::{PendingEdit, ViewState};

pub struct Tracker<S: KeyValueStore> {
    store: S,
    members: Vec<Member>,
    events: Vec<TeamEvent>,
    notes: String,
    view: ViewState,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Load all slices from `store`, falling back to defaults per slice.
    pub fn open(store: S, today: NaiveDate) -> Self {
        let snapshot = persistence::load(&store);
        log::debug!(
            "opened tracker with {} members, {} events",
            snapshot.members.len(),
            snapshot.events.len()
        );

        Tracker {
            store,
            members: snapshot.members,
            events: snapshot.events,
            notes: snapshot.notes,
            view: ViewState::starting(today),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn events(&self) -> &[TeamEvent] {
        &self.events
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn member(&self, id: &RecordId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn event(&self, id: &RecordId) -> Option<&TeamEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// View state is freely adjustable; it is never persisted.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    // DERIVED:

    pub fn visible_members(&self) -> Vec<&Member> {
        self.view.roster.apply(&self.members)
    }

    pub fn board_columns(&self) -> Vec<BoardColumn<'_>> {
        roster::board_columns(&self.visible_members())
    }

    pub fn status_counts(&self) -> [(Status, usize); 4] {
        roster::status_counts(&self.members)
    }

    pub fn day_agenda(&self, day: u32) -> DayAgenda<'_> {
        calendar::day_agenda(day, &self.events, &self.members, self.view.month)
    }

    pub fn events_by_date(&self) -> Vec<&TeamEvent> {
        calendar::events_by_date(&self.events)
    }

    /// Clicking the stat card of the active status clears the filter.
    pub fn toggle_status_filter(&mut self, status: Status) {
        let filter = &mut self.view.roster.status;
        *filter = if *filter == Filter::Only(status) {
            Filter::All
        } else {
            Filter::Only(status)
        };
    }

    // CALENDAR NAVIGATION:

    pub fn previous_month(&mut self) -> MonthCursor {
        self.view.month = self.view.month.previous();
        self.view.month
    }

    pub fn next_month(&mut self) -> MonthCursor {
        self.view.month = self.view.month.next();
        self.view.month
    }

    pub fn show_month(&mut self, month: MonthCursor) {
        self.view.month = month;
    }

    // MEMBER OPERATIONS:

    /// Adds a member from `draft`. Blank names are refused and the add form
    /// stays as it is; on success the form is reset and closed.
    pub fn add_member(&mut self, draft: MemberDraft) -> Option<RecordId> {
        if !draft.is_valid() {
            log::debug!("refusing member with blank name");
            return None;
        }

        let id = self.fresh_member_id();
        self.members.push(Member::from_draft(id.clone(), draft));
        self.view.member_form.reset();
        log::debug!("added member {}", id);

        self.save_members();
        Some(id)
    }

    /// Submits whatever is in the add-member form.
    pub fn submit_member_form(&mut self) -> Option<RecordId> {
        let draft = self.view.member_form.draft.clone();
        self.add_member(draft)
    }

    /// Replaces one field of the member with `id`. Returns whether a member
    /// was found.
    pub fn update_member(&mut self, id: &RecordId, update: MemberUpdate) -> bool {
        let Some(member) = self.members.iter_mut().find(|m| &m.id == id) else {
            return false;
        };

        log::debug!("member {}: set {}", id, update.field_name());
        member.apply(update);
        self.save_members();
        true
    }

    pub fn remove_member(&mut self, id: &RecordId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.id != id);
        if self.members.len() == before {
            return false;
        }

        log::debug!("removed member {}", id);
        self.save_members();
        true
    }

    // PENDING EDIT:

    /// Starts editing a copy of the member with `id`, replacing any edit
    /// already in progress.
    pub fn begin_edit(&mut self, id: &RecordId) -> bool {
        let Some(edit) = self.member(id).map(PendingEdit::of) else {
            return false;
        };
        self.view.pending_edit = Some(edit);
        true
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.view.pending_edit.as_ref()
    }

    /// Changes the pending copy only.
    pub fn edit_pending(&mut self, update: MemberUpdate) -> bool {
        match self.view.pending_edit.as_mut() {
            Some(edit) => {
                edit.apply(update);
                true
            }
            None => false,
        }
    }

    /// Writes the pending copy over the stored member and ends the edit.
    ///
    /// Whatever was written directly to that member while the edit was open
    /// is overwritten. If the member was removed meanwhile, nothing is
    /// stored. Returns whether the collection changed.
    pub fn commit_edit(&mut self) -> bool {
        let Some(edit) = self.view.pending_edit.take() else {
            return false;
        };

        let id = edit.original_id().clone();
        let Some(slot) = self.members.iter_mut().find(|m| m.id == id) else {
            log::debug!("member {} vanished before the edit was saved", id);
            return false;
        };

        *slot = edit.into_member();
        log::debug!("committed edit of member {}", id);
        self.save_members();
        true
    }

    pub fn cancel_edit(&mut self) {
        self.view.pending_edit = None;
    }

    // EVENT OPERATIONS:

    /// Adds an event from `draft`. An empty title or missing date is refused;
    /// on success the event form is reset and closed.
    pub fn add_event(&mut self, draft: EventDraft) -> Option<RecordId> {
        let id = self.fresh_event_id();
        let Some(event) = draft.into_event(id.clone()) else {
            log::debug!("refusing event without title or date");
            return None;
        };

        self.events.push(event);
        self.view.event_form.reset();
        log::debug!("added event {}", id);

        self.save_events();
        Some(id)
    }

    pub fn submit_event_form(&mut self) -> Option<RecordId> {
        let draft = self.view.event_form.draft.clone();
        self.add_event(draft)
    }

    pub fn remove_event(&mut self, id: &RecordId) -> bool {
        let before = self.events.len();
        self.events.retain(|e| &e.id != id);
        if self.events.len() == before {
            return false;
        }

        log::debug!("removed event {}", id);
        self.save_events();
        true
    }

    // NOTES:

    pub fn set_team_notes(&mut self, text: impl Into<String>) {
        self.notes = text.into();
        persistence::save_notes(&mut self.store, &self.notes);
    }

    /// Writes every slice, whether or not it changed.
    pub fn save_all(&mut self) {
        let snapshot = persistence::Snapshot {
            members: self.members.clone(),
            events: self.events.clone(),
            notes: self.notes.clone(),
        };
        persistence::save_all(&mut self.store, &snapshot);
    }

    // INTERNAL:

    fn fresh_member_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if self.member(&id).is_none() {
                return id;
            }
        }
    }

    fn fresh_event_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if self.event(&id).is_none() {
                return id;
            }
        }
    }

    fn save_members(&mut self) {
        persistence::save_members(&mut self.store, &self.members);
    }

    fn save_events(&mut self) {
        persistence::save_events(&mut self.store, &self.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventColor;
    use crate::member::Priority;
    use crate::persistence::{EVENTS_KEY, MEMBERS_KEY, NOTES_KEY};
    use crate::store::MemoryStore;
    use crate::view::Layout;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn empty_tracker() -> Tracker<MemoryStore> {
        let store = MemoryStore::new()
            .with_value(MEMBERS_KEY, "[]")
            .with_value(EVENTS_KEY, "[]");
        Tracker::open(store, today())
    }

    fn seeded_tracker() -> Tracker<MemoryStore> {
        Tracker::open(MemoryStore::new(), today())
    }

    fn stored_members(tracker: &Tracker<MemoryStore>) -> Vec<Member> {
        persistence::load_members(tracker.store())
    }

    #[test]
    fn blank_names_are_refused() {
        let mut tracker = empty_tracker();
        tracker.view_mut().member_form.open();

        for name in ["", "   ", "\t\n"] {
            assert_eq!(tracker.add_member(MemberDraft::named(name)), None);
        }
        assert!(tracker.members().is_empty());
        assert!(tracker.view().member_form.open);
    }

    #[test]
    fn added_member_gets_defaults_and_closes_form() {
        let mut tracker = empty_tracker();
        tracker.view_mut().member_form.open();
        tracker.view_mut().member_form.draft.name = "Jordan".to_string();

        let id = tracker.submit_member_form().unwrap();
        let member = tracker.member(&id).unwrap();

        assert_eq!(member.name, "Jordan");
        assert_eq!(member.status, Status::NotStarted);
        assert_eq!(member.priority, Priority::Medium);
        assert_eq!(member.due_date, None);
        assert!(!tracker.view().member_form.open);
        assert_eq!(tracker.view().member_form.draft, MemberDraft::default());
        assert_eq!(stored_members(&tracker), tracker.members().to_vec());
    }

    #[test]
    fn ids_stay_unique() {
        let mut tracker = seeded_tracker();
        for i in 0..20 {
            tracker.add_member(MemberDraft::named(format!("Member {}", i)));
        }
        let mut ids: Vec<_> = tracker.members().iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 22);
    }

    #[test]
    fn update_touches_one_member_and_persists() {
        let mut tracker = seeded_tracker();
        let alex = RecordId::from(1u64);

        assert!(tracker.update_member(&alex, MemberUpdate::Status(Status::Blocked)));
        assert_eq!(tracker.member(&alex).unwrap().status, Status::Blocked);
        assert_eq!(
            tracker.member(&RecordId::from(2u64)).unwrap().status,
            Status::InProgress
        );
        assert_eq!(stored_members(&tracker)[0].status, Status::Blocked);
    }

    #[test]
    fn update_of_unknown_member_changes_nothing() {
        let mut tracker = seeded_tracker();
        let before = tracker.members().to_vec();
        assert!(!tracker.update_member(&RecordId::from("nope"), MemberUpdate::Name("X".into())));
        assert_eq!(tracker.members(), &before[..]);
        // nothing was written, so the store still has no members key
        assert_eq!(tracker.store().get(MEMBERS_KEY), None);
    }

    #[test]
    fn remove_shrinks_by_exactly_one() {
        let mut tracker = seeded_tracker();
        let id = RecordId::from(2u64);

        assert!(tracker.remove_member(&id));
        assert_eq!(tracker.members().len(), 1);
        assert!(tracker.member(&id).is_none());

        assert!(!tracker.remove_member(&id));
        assert_eq!(tracker.members().len(), 1);
    }

    #[test]
    fn pending_edit_commits_whole_copy() {
        let mut tracker = seeded_tracker();
        let id = RecordId::from(1u64);

        assert!(tracker.begin_edit(&id));
        tracker.edit_pending(MemberUpdate::Task("Billing API".into()));
        tracker.edit_pending(MemberUpdate::Priority(Priority::Low));
        assert_eq!(tracker.member(&id).unwrap().task, "API integration");

        assert!(tracker.commit_edit());
        let member = tracker.member(&id).unwrap();
        assert_eq!(member.task, "Billing API");
        assert_eq!(member.priority, Priority::Low);
        assert!(tracker.pending_edit().is_none());
        assert_eq!(stored_members(&tracker)[0].task, "Billing API");
    }

    #[test]
    fn cancelled_edit_leaves_collection_alone() {
        let mut tracker = seeded_tracker();
        let id = RecordId::from(1u64);
        let before = tracker.members().to_vec();

        tracker.begin_edit(&id);
        tracker.edit_pending(MemberUpdate::Name("Someone Else".into()));
        tracker.cancel_edit();

        assert_eq!(tracker.members(), &before[..]);
        assert!(!tracker.commit_edit());
    }

    #[test]
    fn commit_overwrites_direct_updates_made_meanwhile() {
        let mut tracker = seeded_tracker();
        let id = RecordId::from(1u64);

        tracker.begin_edit(&id);
        tracker.update_member(&id, MemberUpdate::Notes("inline note".into()));
        tracker.edit_pending(MemberUpdate::Status(Status::Done));
        tracker.commit_edit();

        let member = tracker.member(&id).unwrap();
        assert_eq!(member.status, Status::Done);
        assert_eq!(member.notes, "Waiting on backend team");
    }

    #[test]
    fn commit_after_removal_does_not_resurrect() {
        let mut tracker = seeded_tracker();
        let id = RecordId::from(1u64);

        tracker.begin_edit(&id);
        tracker.remove_member(&id);
        assert!(!tracker.commit_edit());
        assert!(tracker.member(&id).is_none());
    }

    #[test]
    fn events_need_title_and_date() {
        let mut tracker = empty_tracker();
        tracker.view_mut().event_form.open();
        tracker.view_mut().event_form.draft.title = "Standup".to_string();

        assert_eq!(tracker.submit_event_form(), None);
        assert!(tracker.view().event_form.open);

        let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        tracker.view_mut().event_form.draft.date = Some(date);
        let id = tracker.submit_event_form().unwrap();

        assert_eq!(tracker.event(&id).unwrap().color, EventColor::Violet);
        assert!(!tracker.view().event_form.open);
    }

    #[test]
    fn added_event_appears_on_its_calendar_day() {
        let mut tracker = empty_tracker();
        let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        tracker.add_event(EventDraft::new("Standup", date));
        tracker.show_month(MonthCursor::new(2025, 1).unwrap());

        let agenda = tracker.day_agenda(13);
        assert_eq!(agenda.events.len(), 1);
        assert_eq!(agenda.events[0].title, "Standup");
    }

    #[test]
    fn removing_events_persists() {
        let mut tracker = seeded_tracker();
        assert!(tracker.remove_event(&RecordId::from(1u64)));
        assert!(!tracker.remove_event(&RecordId::from(1u64)));

        let stored = persistence::load_events(tracker.store());
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Design Review");
    }

    #[test]
    fn notes_are_overwritten() {
        let mut tracker = seeded_tracker();
        tracker.set_team_notes("first");
        tracker.set_team_notes("second");
        assert_eq!(tracker.notes(), "second");
        assert_eq!(tracker.store().get(NOTES_KEY).as_deref(), Some("second"));
    }

    #[test]
    fn reopening_restores_state() {
        let mut tracker = seeded_tracker();
        tracker.add_member(MemberDraft::named("Riley"));
        tracker.set_team_notes("Demo Thursday");
        tracker.add_event(
            EventDraft::new("Offsite", NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
                .with_color(EventColor::Amber),
        );

        let members = tracker.members().to_vec();
        let events = tracker.events().to_vec();
        let reopened = Tracker::open(tracker.store().clone(), today());

        assert_eq!(reopened.members(), &members[..]);
        assert_eq!(reopened.events(), &events[..]);
        assert_eq!(reopened.notes(), "Demo Thursday");
    }

    #[test]
    fn save_all_writes_seed_to_fresh_store() {
        let mut tracker = seeded_tracker();
        assert!(tracker.store().is_empty());

        tracker.save_all();
        assert_eq!(tracker.store().len(), 3);
        assert_eq!(stored_members(&tracker), tracker.members().to_vec());
    }

    #[test]
    fn stat_card_toggles_status_filter() {
        let mut tracker = seeded_tracker();
        tracker.toggle_status_filter(Status::Blocked);
        assert_eq!(tracker.view().roster.status, Filter::Only(Status::Blocked));
        assert!(tracker.visible_members().is_empty());

        tracker.toggle_status_filter(Status::Blocked);
        assert_eq!(tracker.view().roster.status, Filter::All);
        assert_eq!(tracker.visible_members().len(), 2);
    }

    #[test]
    fn month_navigation_round_trips() {
        let mut tracker = seeded_tracker();
        let start = tracker.view().month;
        tracker.previous_month();
        assert_ne!(tracker.view().month, start);
        tracker.next_month();
        assert_eq!(tracker.view().month, start);
    }

    #[test]
    fn layout_switch_does_not_touch_domain_state() {
        let mut tracker = seeded_tracker();
        let before = tracker.members().to_vec();
        for layout in Layout::ALL {
            tracker.view_mut().layout = layout;
            assert_eq!(tracker.visible_members().len(), 2);
        }
        assert_eq!(tracker.members(), &before[..]);
    }
}
