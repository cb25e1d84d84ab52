//! Core of teamtrack: a small team's roster, statuses and calendar.
//!
//! - `member` / `event` hold the records
//! - `roster` and `calendar` derive the display-ready views
//! - `tracker` owns the state and performs every mutation
//! - `persistence` and `store` mirror state to key-value storage

pub mod calendar;
pub mod error;
pub mod event;
pub mod id;
pub mod member;
pub mod persistence;
pub mod roster;
pub mod settings;
pub mod store;
pub mod tracker;
pub mod view;

pub use error::{TrackerError, TrackerResult};
pub use event::{EventColor, EventDraft, TeamEvent};
pub use id::RecordId;
pub use member::{Member, MemberDraft, MemberUpdate, Priority, Status};
pub use tracker::Tracker;
