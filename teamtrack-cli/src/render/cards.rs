use owo_colors::OwoColorize;
use teamtrack_core::member::Member;

use super::{NO_MEMBERS_FOUND, Render, due_text, initials};

const INDENT: &str = "     ";

pub fn render(members: &[&Member]) -> String {
    if members.is_empty() {
        return NO_MEMBERS_FOUND.dimmed().to_string();
    }
    members
        .iter()
        .map(|m| card(m))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn card(member: &Member) -> String {
    let avatar = format!("[{}]", initials(&member.name));
    let mut lines = vec![format!(
        "{} {}  {}",
        avatar.cyan().bold(),
        member.name.bold(),
        member.id.short().dimmed()
    )];

    if member.task.is_empty() {
        lines.push(format!("{INDENT}{}", "No task assigned".dimmed()));
    } else {
        lines.push(format!("{INDENT}{} {}", "Working on:".dimmed(), member.task));
    }

    lines.push(format!(
        "{INDENT}{}   {}   {} {}",
        member.status.render(),
        member.priority.render(),
        "Due:".dimmed(),
        due_text(member.due_date)
    ));

    if !member.notes.is_empty() {
        lines.push(format!("{INDENT}{}", member.notes.italic()));
    }

    lines.join("\n")
}
