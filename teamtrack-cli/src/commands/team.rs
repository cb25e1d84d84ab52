use anyhow::Result;
use chrono::NaiveDate;
use teamtrack_core::roster::RosterQuery;
use teamtrack_core::view::{Layout, View};

use super::App;
use crate::render;

pub fn run(
    tracker: &mut App,
    layout: Layout,
    query: RosterQuery,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let view = tracker.view_mut();
    view.view = View::Team;
    view.layout = layout;
    view.roster = query;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracker.visible_members())?);
    } else {
        println!("{}", render::screen(tracker, today));
    }
    Ok(())
}
