use owo_colors::OwoColorize;
use teamtrack_core::member::Member;

use super::{NO_MEMBERS_FOUND, Render, due_text, initials, pad};

/// One line per member.
pub fn render(members: &[&Member]) -> String {
    if members.is_empty() {
        return NO_MEMBERS_FOUND.dimmed().to_string();
    }

    let name_width = members
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);

    members
        .iter()
        .map(|m| {
            let task = if m.task.is_empty() {
                "No task".dimmed().to_string()
            } else {
                m.task.clone()
            };
            format!(
                "{} {} {} {}  {}  {}  {}",
                pad(&format!("[{}]", initials(&m.name)), 4).cyan(),
                pad(&m.name, name_width).bold(),
                "—".dimmed(),
                task,
                m.priority.render(),
                m.status.render(),
                due_text(m.due_date).dimmed(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
