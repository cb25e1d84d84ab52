pub mod calendar;
pub mod config;
pub mod event;
pub mod member;
pub mod notes;
pub mod team;

use anyhow::{Result, bail};
use teamtrack_core::Tracker;
use teamtrack_core::id::RecordId;
use teamtrack_core::store::FileStore;

pub type App = Tracker<FileStore>;

/// Resolve a full id, or a prefix matching exactly one of `ids`.
pub fn resolve_id<'a>(
    kind: &str,
    input: &str,
    ids: impl IntoIterator<Item = &'a RecordId>,
) -> Result<RecordId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Missing {kind} id");
    }

    let ids: Vec<&RecordId> = ids.into_iter().collect();
    if let Some(exact) = ids.iter().find(|id| id.as_str() == input) {
        return Ok((*exact).clone());
    }

    let matches: Vec<&RecordId> = ids
        .into_iter()
        .filter(|id| id.as_str().starts_with(input))
        .collect();

    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => bail!("No {kind} with id '{input}'"),
        many => {
            let candidates: Vec<&str> = many.iter().map(|id| id.as_str()).collect();
            bail!(
                "'{input}' matches {} {kind}s: {}",
                many.len(),
                candidates.join(", ")
            )
        }
    }
}

pub fn resolve_member(tracker: &App, input: &str) -> Result<RecordId> {
    resolve_id("member", input, tracker.members().iter().map(|m| &m.id))
}

pub fn resolve_event(tracker: &App, input: &str) -> Result<RecordId> {
    resolve_id("event", input, tracker.events().iter().map(|e| &e.id))
}
