use chrono::NaiveDate;
use owo_colors::OwoColorize;
use teamtrack_core::calendar::{self, AgendaEntry, MonthCursor, WEEKDAY_LABELS};
use teamtrack_core::event::TeamEvent;
use teamtrack_core::member::Member;

use super::{pad, paint_event, truncate};

const CELL: usize = 13;
/// Entries shown per day before collapsing into "+N more".
const PREVIEW_LIMIT: usize = 2;

/// Month grid, Sunday first, with events and due tasks in each day cell.
pub fn render(
    month: MonthCursor,
    events: &[TeamEvent],
    members: &[Member],
    today: NaiveDate,
) -> String {
    let width = CELL * 7 + 6;
    let mut lines = vec![
        format!("{:^width$}", month.to_string()).bold().to_string(),
        WEEKDAY_LABELS
            .iter()
            .map(|label| pad(label, CELL))
            .collect::<Vec<_>>()
            .join("│")
            .dimmed()
            .to_string(),
    ];

    let separator = "─".repeat(width).dimmed().to_string();
    for week in month.weeks() {
        lines.push(separator.clone());
        let cells: Vec<[String; PREVIEW_LIMIT + 2]> = week
            .iter()
            .map(|day| match day {
                Some(day) => day_cell(month, *day, events, members, today),
                None => std::array::from_fn(|_| " ".repeat(CELL)),
            })
            .collect();

        for row in 0..PREVIEW_LIMIT + 2 {
            let line: Vec<&str> = cells.iter().map(|c| c[row].as_str()).collect();
            lines.push(line.join("│"));
        }
    }
    lines.push(separator);

    lines.join("\n")
}

/// Day number, up to `PREVIEW_LIMIT` entries, then the overflow line.
fn day_cell(
    month: MonthCursor,
    day: u32,
    events: &[TeamEvent],
    members: &[Member],
    today: NaiveDate,
) -> [String; PREVIEW_LIMIT + 2] {
    let agenda = calendar::day_agenda(day, events, members, month);
    let (shown, hidden) = agenda.preview(PREVIEW_LIMIT);

    let number = format!("{day:>2}");
    let number = if month.is_today(day, today) {
        number.black().on_cyan().bold().to_string()
    } else {
        number
    };

    let mut cell: [String; PREVIEW_LIMIT + 2] = std::array::from_fn(|_| " ".repeat(CELL));
    cell[0] = format!("{number}{}", " ".repeat(CELL - 2));

    for (slot, entry) in cell[1..=PREVIEW_LIMIT].iter_mut().zip(shown) {
        *slot = match entry {
            AgendaEntry::Event(event) => {
                paint_event(&pad(&truncate(&event.title, CELL), CELL), event.color)
            }
            AgendaEntry::Task(member) => {
                let text = truncate(&format!("• {}", member.name), CELL);
                pad(&text, CELL).yellow().to_string()
            }
        };
    }

    if hidden > 0 {
        cell[PREVIEW_LIMIT + 1] = pad(&format!("+{hidden} more"), CELL).dimmed().to_string();
    }

    cell
}
