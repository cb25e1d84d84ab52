mod commands;
mod dates;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use teamtrack_core::Tracker;
use teamtrack_core::calendar::MonthCursor;
use teamtrack_core::event::EventColor;
use teamtrack_core::member::{Priority, Status};
use teamtrack_core::persistence::MEMBERS_KEY;
use teamtrack_core::roster::{Filter, RosterQuery, SortKey};
use teamtrack_core::settings::Settings;
use teamtrack_core::store::{FileStore, KeyValueStore};
use teamtrack_core::view::Layout;

use commands::member::{ChangeArgs, FieldArgs};

#[derive(Parser)]
#[command(name = "teamtrack")]
#[command(about = "Track who on your team is working on what, and when")]
#[command(version)]
struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the team roster
    Team {
        /// cards, table, board or compact
        #[arg(short, long)]
        layout: Option<Layout>,

        /// Only members whose name or task contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only members with this status ("all" for everyone)
        #[arg(long)]
        status: Option<Filter<Status>>,

        /// Only members with this priority ("all" for everyone)
        #[arg(long)]
        priority: Option<Filter<Priority>>,

        /// name, status, priority or dueDate
        #[arg(long)]
        sort: Option<SortKey>,

        /// Print the visible members as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add, change or remove team members
    #[command(subcommand)]
    Member(MemberCommands),
    /// Add, remove or list team events
    #[command(subcommand)]
    Event(EventCommands),
    /// Show a month of events and due dates
    Calendar {
        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<MonthCursor>,

        /// Step back this many months
        #[arg(long, default_value_t = 0)]
        prev: u32,

        /// Step forward this many months
        #[arg(long, default_value_t = 0)]
        next: u32,
    },
    /// Show the team notes, or replace them with TEXT
    Notes { text: Option<String> },
    /// Show config paths and defaults, or change the defaults
    Config {
        /// Save this as the default roster layout
        #[arg(long)]
        default_layout: Option<Layout>,

        /// Save this as the default roster order
        #[arg(long)]
        default_sort: Option<SortKey>,
    },
}

#[derive(Subcommand)]
enum MemberCommands {
    /// Add a member (prompts for details when NAME is omitted)
    Add {
        name: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Change fields of a member
    Set {
        /// Member id or unique prefix
        id: String,

        #[command(flatten)]
        changes: ChangeArgs,
    },
    /// Edit a copy of a member, then save it in one go
    Edit {
        /// Member id or unique prefix
        id: String,

        #[command(flatten)]
        changes: ChangeArgs,
    },
    /// Remove a member
    Remove {
        /// Member id or unique prefix
        id: String,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// Add an event
    Add {
        title: String,

        /// Event date (YYYY-MM-DD, or e.g. "next fri")
        #[arg(short, long)]
        date: String,

        /// violet, blue, emerald, red or amber
        #[arg(short, long, default_value_t = EventColor::default())]
        color: EventColor,
    },
    /// Remove an event
    Remove {
        /// Event id or unique prefix
        id: String,
    },
    /// List all events by date
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = utils::logging::init(cli.verbose)?;

    let saved = Settings::load()?;
    let mut settings = saved.clone();
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    log::debug!("data directory: {}", settings.data_path().display());

    if let Commands::Config {
        default_layout,
        default_sort,
    } = cli.command
    {
        return commands::config::run(&saved, &settings, default_layout, default_sort);
    }

    let today = chrono::Local::now().date_naive();
    let mut tracker = open_tracker(settings.store(), today);

    match cli.command {
        Commands::Team {
            layout,
            search,
            status,
            priority,
            sort,
            json,
        } => {
            let query = RosterQuery {
                search: search.unwrap_or_default(),
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                sort: sort.unwrap_or(settings.default_sort),
            };
            let layout = layout.unwrap_or(settings.default_layout);
            commands::team::run(&mut tracker, layout, query, json, today)
        }
        Commands::Member(command) => match command {
            MemberCommands::Add { name, fields } => {
                commands::member::add(&mut tracker, name, fields)
            }
            MemberCommands::Set { id, changes } => {
                commands::member::set(&mut tracker, &id, changes)
            }
            MemberCommands::Edit { id, changes } => {
                commands::member::edit(&mut tracker, &id, changes)
            }
            MemberCommands::Remove { id } => commands::member::remove(&mut tracker, &id),
        },
        Commands::Event(command) => match command {
            EventCommands::Add { title, date, color } => {
                commands::event::add(&mut tracker, title, &date, color)
            }
            EventCommands::Remove { id } => commands::event::remove(&mut tracker, &id),
            EventCommands::List => commands::event::list(&tracker),
        },
        Commands::Calendar { month, prev, next } => {
            commands::calendar::run(&mut tracker, month, prev, next, today)
        }
        Commands::Notes { text } => commands::notes::run(&mut tracker, text),
        Commands::Config {
            default_layout,
            default_sort,
        } => commands::config::run(&saved, &settings, default_layout, default_sort),
    }
}

/// Open the tracker, writing the sample team to a data directory that has
/// never been used.
fn open_tracker(store: FileStore, today: chrono::NaiveDate) -> commands::App {
    let fresh = store.get(MEMBERS_KEY).is_none();
    let mut tracker = Tracker::open(store, today);
    if fresh {
        log::info!("initializing {}", tracker.store().dir().display());
        tracker.save_all();
    }
    tracker
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn team_flags_parse_into_domain_types() {
        let cli = Cli::parse_from([
            "teamtrack", "team", "--layout", "board", "--status", "in-progress", "--priority",
            "all", "--sort", "dueDate",
        ]);
        let Commands::Team {
            layout,
            status,
            priority,
            sort,
            ..
        } = cli.command
        else {
            panic!("expected team command");
        };
        assert_eq!(layout, Some(Layout::Board));
        assert_eq!(status, Some(Filter::Only(Status::InProgress)));
        assert_eq!(priority, Some(Filter::All));
        assert_eq!(sort, Some(SortKey::DueDate));
    }

    #[test]
    fn clear_due_conflicts_with_due() {
        let result = Cli::try_parse_from([
            "teamtrack", "member", "set", "1", "--due", "tomorrow", "--clear-due",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn event_color_defaults_to_violet() {
        let cli = Cli::parse_from(["teamtrack", "event", "add", "Retro", "--date", "2025-01-20"]);
        let Commands::Event(EventCommands::Add { color, .. }) = cli.command else {
            panic!("expected event add");
        };
        assert_eq!(color, EventColor::Violet);
    }

    #[test]
    fn config_takes_new_defaults() {
        let cli = Cli::parse_from([
            "teamtrack", "config", "--default-layout", "table", "--default-sort", "priority",
        ]);
        let Commands::Config {
            default_layout,
            default_sort,
        } = cli.command
        else {
            panic!("expected config command");
        };
        assert_eq!(default_layout, Some(Layout::Table));
        assert_eq!(default_sort, Some(SortKey::Priority));
    }

    #[test]
    fn first_open_seeds_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };

        let tracker = open_tracker(settings.store(), today);
        assert_eq!(tracker.members().len(), 2);
        assert!(dir.path().join(MEMBERS_KEY).exists());
    }
}
