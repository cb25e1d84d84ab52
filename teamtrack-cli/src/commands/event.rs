use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use teamtrack_core::event::{EventColor, EventDraft};

use super::{App, resolve_event};
use crate::dates::parse_date;
use crate::render::{self, paint_event};

pub fn add(tracker: &mut App, title: String, date: &str, color: EventColor) -> Result<()> {
    let date = parse_date(date)?;

    let form = &mut tracker.view_mut().event_form;
    form.open();
    form.draft = EventDraft::new(title, date).with_color(color);

    let Some(id) = tracker.submit_event_form() else {
        bail!("Event title cannot be empty");
    };

    if let Some(event) = tracker.event(&id) {
        println!(
            "  {} {}",
            paint_event("●", event.color),
            format!("Created: {} on {} ({})", event.title, event.date, id.short()).green()
        );
    }
    Ok(())
}

pub fn remove(tracker: &mut App, id: &str) -> Result<()> {
    let id = resolve_event(tracker, id)?;
    let title = tracker
        .event(&id)
        .map(|e| e.title.clone())
        .unwrap_or_default();

    if tracker.remove_event(&id) {
        println!("{}", format!("  Removed: {title}").red());
    }
    Ok(())
}

pub fn list(tracker: &App) -> Result<()> {
    println!("{}", "All Events".bold());
    println!("{}", render::event_list(&tracker.events_by_date()));
    Ok(())
}
