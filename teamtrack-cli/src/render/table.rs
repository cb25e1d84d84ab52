use owo_colors::OwoColorize;
use teamtrack_core::member::Member;

use super::{NO_MEMBERS_FOUND, due_text, pad, paint_priority, paint_status, truncate};

const HEADERS: [&str; 7] = ["ID", "Member", "Task", "Status", "Priority", "Due Date", "Notes"];
const STATUS_COL: usize = 3;
const PRIORITY_COL: usize = 4;
const MAX_TEXT: usize = 28;

pub fn render(members: &[&Member]) -> String {
    let rows: Vec<[String; 7]> = members.iter().map(|m| row(m)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect::<Vec<_>>()
        .join("  ");
    let total = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);

    let mut lines = vec![header.bold().to_string(), "─".repeat(total).dimmed().to_string()];

    if members.is_empty() {
        lines.push(NO_MEMBERS_FOUND.dimmed().to_string());
    }

    for (member, row) in members.iter().zip(&rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, w);
                match i {
                    0 => padded.dimmed().to_string(),
                    STATUS_COL => paint_status(member.status, &padded),
                    PRIORITY_COL => paint_priority(member.priority, &padded),
                    _ => padded,
                }
            })
            .collect();
        lines.push(cells.join("  ").trim_end().to_string());
    }

    lines.join("\n")
}

fn row(member: &Member) -> [String; 7] {
    [
        member.id.short().to_string(),
        member.name.clone(),
        truncate(&member.task, MAX_TEXT),
        member.status.label().to_string(),
        member.priority.label().to_string(),
        due_text(member.due_date),
        truncate(&member.notes, MAX_TEXT),
    ]
}
