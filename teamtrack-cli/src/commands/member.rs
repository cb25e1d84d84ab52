use anyhow::{Result, bail};
use clap::Args;
use owo_colors::OwoColorize;
use teamtrack_core::member::{Member, MemberDraft, MemberUpdate, Priority, Status};

use super::{App, resolve_member};
use crate::dates::parse_date;
use crate::render;
use crate::utils::prompt;

/// Field flags shared by `member add`, `member set` and `member edit`.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// What the member is working on
    #[arg(long)]
    pub task: Option<String>,

    /// not-started, in-progress, blocked or done
    #[arg(long)]
    pub status: Option<Status>,

    /// low, medium or high
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Due date (YYYY-MM-DD, or e.g. "next fri")
    #[arg(long)]
    pub due: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Changes to an existing member.
#[derive(Args, Debug, Default)]
pub struct ChangeArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,
}

impl ChangeArgs {
    /// One update per flag given, in field order.
    fn updates(self) -> Result<Vec<MemberUpdate>> {
        let mut updates = Vec::new();

        if let Some(name) = self.name {
            if name.trim().is_empty() {
                bail!("Member name cannot be blank");
            }
            updates.push(MemberUpdate::Name(name));
        }
        if let Some(task) = self.fields.task {
            updates.push(MemberUpdate::Task(task));
        }
        if let Some(status) = self.fields.status {
            updates.push(MemberUpdate::Status(status));
        }
        if let Some(priority) = self.fields.priority {
            updates.push(MemberUpdate::Priority(priority));
        }
        if let Some(due) = self.fields.due {
            updates.push(MemberUpdate::DueDate(Some(parse_date(&due)?)));
        }
        if self.clear_due {
            updates.push(MemberUpdate::DueDate(None));
        }
        if let Some(notes) = self.fields.notes {
            updates.push(MemberUpdate::Notes(notes));
        }

        Ok(updates)
    }
}

fn draft_from(name: String, fields: FieldArgs) -> Result<MemberDraft> {
    Ok(MemberDraft {
        name,
        task: fields.task.unwrap_or_default(),
        status: fields.status.unwrap_or_default(),
        priority: fields.priority.unwrap_or_default(),
        due_date: fields.due.as_deref().map(parse_date).transpose()?,
        notes: fields.notes.unwrap_or_default(),
    })
}

/// Add a member. Without a name, every field is asked for interactively,
/// pre-filled from any flags given.
pub fn add(tracker: &mut App, name: Option<String>, fields: FieldArgs) -> Result<()> {
    let draft = match name {
        Some(name) => draft_from(name, fields)?,
        None => prompt_draft(draft_from(String::new(), fields)?)?,
    };

    let form = &mut tracker.view_mut().member_form;
    form.open();
    form.draft = draft;

    let Some(id) = tracker.submit_member_form() else {
        bail!("Member name cannot be blank");
    };

    if let Some(member) = tracker.member(&id) {
        println!(
            "{}",
            format!("  Added: {} ({})", member.name, id.short()).green()
        );
    }
    Ok(())
}

fn prompt_draft(initial: MemberDraft) -> Result<MemberDraft> {
    Ok(MemberDraft {
        name: prompt::required_text("Name", &initial.name)?,
        task: prompt::text("Task", &initial.task)?,
        status: prompt::choose("Status", &Status::ALL, initial.status)?,
        priority: prompt::choose("Priority", &Priority::ALL, initial.priority)?,
        due_date: prompt::optional_date("Due date", initial.due_date)?,
        notes: prompt::text("Notes", &initial.notes)?,
    })
}

/// Apply field changes straight to the stored member.
pub fn set(tracker: &mut App, id: &str, changes: ChangeArgs) -> Result<()> {
    let id = resolve_member(tracker, id)?;
    let updates = changes.updates()?;
    if updates.is_empty() {
        bail!("Nothing to change. Pass at least one field flag, e.g. --status done");
    }

    for update in updates {
        tracker.update_member(&id, update);
    }

    if let Some(member) = tracker.member(&id) {
        println!("{}", render::cards::render(&[member]));
    }
    Ok(())
}

/// Edit a copy of the member and save it as a whole.
///
/// With field flags the copy is changed and saved right away; without any,
/// each field is prompted for and the result must be confirmed.
pub fn edit(tracker: &mut App, id: &str, changes: ChangeArgs) -> Result<()> {
    let id = resolve_member(tracker, id)?;
    tracker.begin_edit(&id);

    let updates = changes.updates()?;
    let interactive = updates.is_empty();

    if interactive {
        let Some(edit) = tracker.pending_edit() else {
            bail!("No member with id '{id}'");
        };
        let answers = prompt_changes(edit.draft())?;
        for update in answers {
            tracker.edit_pending(update);
        }
    } else {
        for update in updates {
            tracker.edit_pending(update);
        }
    }

    if let Some(edit) = tracker.pending_edit() {
        println!();
        println!("{}", render::cards::render(&[edit.draft()]));
        println!();
    }

    if interactive && !prompt::confirm("Save changes?", true)? {
        tracker.cancel_edit();
        println!("{}", "  Discarded".dimmed());
        return Ok(());
    }

    if !tracker.commit_edit() {
        bail!("Member '{id}' no longer exists");
    }
    println!("{}", "  Saved".green());
    Ok(())
}

fn prompt_changes(current: &Member) -> Result<Vec<MemberUpdate>> {
    Ok(vec![
        MemberUpdate::Name(prompt::required_text("Name", &current.name)?),
        MemberUpdate::Task(prompt::text("Task", &current.task)?),
        MemberUpdate::Status(prompt::choose("Status", &Status::ALL, current.status)?),
        MemberUpdate::Priority(prompt::choose("Priority", &Priority::ALL, current.priority)?),
        MemberUpdate::DueDate(prompt::optional_date("Due date", current.due_date)?),
        MemberUpdate::Notes(prompt::text("Notes", &current.notes)?),
    ])
}

pub fn remove(tracker: &mut App, id: &str) -> Result<()> {
    let id = resolve_member(tracker, id)?;
    let name = tracker
        .member(&id)
        .map(|m| m.name.clone())
        .unwrap_or_default();

    if tracker.remove_member(&id) {
        println!("{}", format!("  Removed: {name}").red());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_become_updates_in_field_order() {
        let changes = ChangeArgs {
            name: Some("Alex C.".to_string()),
            fields: FieldArgs {
                status: Some(Status::Blocked),
                due: Some("2025-02-01".to_string()),
                ..FieldArgs::default()
            },
            clear_due: false,
        };

        assert_eq!(
            changes.updates().unwrap(),
            vec![
                MemberUpdate::Name("Alex C.".to_string()),
                MemberUpdate::Status(Status::Blocked),
                MemberUpdate::DueDate(NaiveDate::from_ymd_opt(2025, 2, 1)),
            ]
        );
    }

    #[test]
    fn clear_due_and_blank_name() {
        let clear = ChangeArgs {
            clear_due: true,
            ..ChangeArgs::default()
        };
        assert_eq!(clear.updates().unwrap(), vec![MemberUpdate::DueDate(None)]);

        let blank = ChangeArgs {
            name: Some("   ".to_string()),
            ..ChangeArgs::default()
        };
        assert!(blank.updates().is_err());
    }

    #[test]
    fn no_flags_means_no_updates() {
        assert!(ChangeArgs::default().updates().unwrap().is_empty());
    }

    #[test]
    fn draft_takes_flags_and_defaults() {
        let fields = FieldArgs {
            task: Some("Docs".to_string()),
            priority: Some(Priority::High),
            ..FieldArgs::default()
        };
        let draft = draft_from("Riley".to_string(), fields).unwrap();
        assert_eq!(draft.name, "Riley");
        assert_eq!(draft.task, "Docs");
        assert_eq!(draft.status, Status::NotStarted);
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.due_date, None);
    }

    #[test]
    fn bad_due_date_is_an_error() {
        let fields = FieldArgs {
            due: Some("not a date at all xyz".to_string()),
            ..FieldArgs::default()
        };
        assert!(draft_from("Riley".to_string(), fields).is_err());
    }
}
