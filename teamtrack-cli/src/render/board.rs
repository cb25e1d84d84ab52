use owo_colors::OwoColorize;
use teamtrack_core::roster::BoardColumn;

use super::{initials, paint_priority, paint_status, priority_glyph};

const INDENT: &str = "       ";

/// One column per status, stacked vertically.
pub fn render(columns: &[BoardColumn<'_>]) -> String {
    columns
        .iter()
        .map(column)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn column(column: &BoardColumn<'_>) -> String {
    let heading = format!("● {} ({})", column.status.label(), column.count());
    let mut lines = vec![paint_status(column.status, &heading).bold().to_string()];

    if column.members.is_empty() {
        lines.push(format!("   {}", "No members".dimmed()));
    }

    for member in &column.members {
        lines.push(format!(
            "   {} {}  {}",
            format!("[{}]", initials(&member.name)).cyan(),
            member.name.bold(),
            member.id.short().dimmed()
        ));

        let task = if member.task.is_empty() {
            "No task assigned".dimmed().to_string()
        } else {
            member.task.clone()
        };
        lines.push(format!("{INDENT}{task}"));

        let mut meta = paint_priority(
            member.priority,
            &format!("{} {}", priority_glyph(member.priority), member.priority.label()),
        );
        if let Some(due) = member.due_date {
            meta.push_str(&format!("  {}", due.format("%m/%d").to_string().dimmed()));
        }
        lines.push(format!("{INDENT}{meta}"));

        if !member.notes.is_empty() {
            lines.push(format!("{INDENT}{}", member.notes.italic().dimmed()));
        }
    }

    lines.join("\n")
}
