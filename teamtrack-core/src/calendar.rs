//! Month navigation and per-day aggregation for the calendar view.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{TrackerError, TrackerResult};
use crate::event::TeamEvent;
use crate::member::Member;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The month shown by the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthCursor {
    year: i32,
    /// 1..=12
    month: u32,
}

impl MonthCursor {
    /// Returns `None` when `month` is outside 1..=12 or the year is beyond
    /// what chrono can represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| MonthCursor { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// The month before. Stays put at the start of the representable calendar.
    pub fn previous(&self) -> Self {
        self.shift(-1).unwrap_or(*self)
    }

    /// The month after. Stays put at the end of the representable calendar.
    pub fn next(&self) -> Self {
        self.shift(1).unwrap_or(*self)
    }

    /// Move by a signed number of months, or `None` past the calendar's range.
    pub fn shift(&self, months: i64) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1);
        let target = index.checked_add(months)?;
        let year = i32::try_from(target.div_euclid(12)).ok()?;
        let month = u32::try_from(target.rem_euclid(12)).ok()? + 1;
        MonthCursor::new(year, month)
    }

    pub fn first_day(&self) -> NaiveDate {
        // validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// Number of empty cells before day 1 in a Sunday-first week.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Sunday-first rows of seven cells; `None` pads before day 1 and after
    /// the last day.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let blanks = self.leading_blanks() as usize;
        let days = self.days_in_month() as usize;
        let cells = (blanks + days).div_ceil(7) * 7;

        let mut weeks = Vec::with_capacity(cells / 7);
        let mut row = [None; 7];
        for cell in 0..cells {
            row[cell % 7] = (cell >= blanks && cell < blanks + days).then(|| (cell - blanks + 1) as u32);
            if cell % 7 == 6 {
                weeks.push(row);
                row = [None; 7];
            }
        }
        weeks
    }

    /// Whether `day` of this month is `today`.
    pub fn is_today(&self, day: u32, today: NaiveDate) -> bool {
        self.date(day) == Some(today)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for MonthCursor {
    type Err = TrackerError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> TrackerResult<Self> {
        let invalid = || TrackerError::invalid("month", s, &["YYYY-MM"]);
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthCursor::new(year, month).ok_or_else(invalid)
    }
}

/// One annotation in a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaEntry<'a> {
    Event(&'a TeamEvent),
    Task(&'a Member),
}

/// Events and task due dates falling on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAgenda<'a> {
    pub events: Vec<&'a TeamEvent>,
    pub tasks: Vec<&'a Member>,
}

impl<'a> DayAgenda<'a> {
    pub fn len(&self) -> usize {
        self.events.len() + self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// At most `limit` entries, events before tasks, plus how many were left out.
    pub fn preview(&self, limit: usize) -> (Vec<AgendaEntry<'a>>, usize) {
        let entries: Vec<AgendaEntry<'a>> = self
            .events
            .iter()
            .map(|e| AgendaEntry::Event(*e))
            .chain(self.tasks.iter().map(|m| AgendaEntry::Task(*m)))
            .take(limit)
            .collect();
        let hidden = self.len() - entries.len();
        (entries, hidden)
    }
}

/// Events dated on `day` of `month` and members due that day.
/// Days that do not exist in the month yield an empty agenda.
pub fn day_agenda<'a>(
    day: u32,
    events: &'a [TeamEvent],
    members: &'a [Member],
    month: MonthCursor,
) -> DayAgenda<'a> {
    let Some(date) = month.date(day) else {
        return DayAgenda::default();
    };

    DayAgenda {
        events: events.iter().filter(|e| e.is_on(date)).collect(),
        tasks: members
            .iter()
            .filter(|m| m.due_date == Some(date))
            .collect(),
    }
}

/// Events ordered by date, leaving the stored order untouched.
pub fn events_by_date(events: &[TeamEvent]) -> Vec<&TeamEvent> {
    let mut sorted: Vec<&TeamEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}
