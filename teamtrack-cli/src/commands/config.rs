use anyhow::Result;
use owo_colors::OwoColorize;
use teamtrack_core::persistence::{EVENTS_KEY, MEMBERS_KEY, NOTES_KEY};
use teamtrack_core::roster::SortKey;
use teamtrack_core::settings::Settings;
use teamtrack_core::view::Layout;

/// Show where things live. `saved` is the config file as written; `active`
/// has command-line overrides such as `--data-dir` applied. New defaults
/// are written back to the config file.
pub fn run(
    saved: &Settings,
    active: &Settings,
    layout: Option<Layout>,
    sort: Option<SortKey>,
) -> Result<()> {
    let config_path = Settings::config_path()?;

    let updated = with_defaults(saved, layout, sort);
    if let Some(updated) = &updated {
        updated.save_to(&config_path)?;
        log::info!("wrote {}", config_path.display());
        println!("{}", format!("Saved defaults to {}", config_path.display()).green());
        println!();
    }
    let defaults = updated.as_ref().unwrap_or(saved);

    let data_path = active.data_path();
    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!(
        "  Data:       {} {}",
        active.display_path().display(),
        format!("({})", data_path.display()).dimmed()
    );
    for key in [MEMBERS_KEY, EVENTS_KEY, NOTES_KEY] {
        println!("              {}", data_path.join(key).display().dimmed());
    }

    println!();
    println!("{}", "Defaults".bold());
    println!("  Layout:     {}", defaults.default_layout);
    println!("  Sort:       {}", defaults.default_sort.name());

    Ok(())
}

/// `saved` with the given defaults applied, or `None` when nothing changes.
fn with_defaults(
    saved: &Settings,
    layout: Option<Layout>,
    sort: Option<SortKey>,
) -> Option<Settings> {
    let mut updated = saved.clone();
    if let Some(layout) = layout {
        updated.default_layout = layout;
    }
    if let Some(sort) = sort {
        updated.default_sort = sort;
    }
    (updated != *saved).then_some(updated)
}
