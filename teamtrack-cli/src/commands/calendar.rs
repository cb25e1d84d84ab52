use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use teamtrack_core::calendar::MonthCursor;
use teamtrack_core::view::View;

use super::App;
use crate::render;

/// Show one month. `month` defaults to the one containing today; `back`
/// and `forward` then step from there.
pub fn run(
    tracker: &mut App,
    month: Option<MonthCursor>,
    back: u32,
    forward: u32,
    today: NaiveDate,
) -> Result<()> {
    tracker.view_mut().view = View::Calendar;
    if let Some(month) = month {
        tracker.show_month(month);
    }

    let start = tracker.view().month;
    let target = start
        .shift(i64::from(forward) - i64::from(back))
        .ok_or_else(|| anyhow!("Cannot move that far from {start}"))?;
    tracker.show_month(target);

    println!("{}", render::screen(tracker, today));
    Ok(())
}
