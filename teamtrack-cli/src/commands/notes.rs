use anyhow::Result;
use owo_colors::OwoColorize;

use super::App;

/// Print the team notes, or replace them with `text`.
pub fn run(tracker: &mut App, text: Option<String>) -> Result<()> {
    match text {
        Some(text) => {
            tracker.set_team_notes(text);
            println!("{}", "  Team notes saved".green());
        }
        None if tracker.notes().is_empty() => {
            println!("{}", "No team notes yet".dimmed());
        }
        None => println!("{}", tracker.notes()),
    }
    Ok(())
}
