//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the pure aggregation/calendar logic.
//! Nothing in here touches the database or HTTP.

pub mod calendar;
pub mod client;
pub mod password;
pub mod period;
pub mod project;
pub mod report;
pub mod time_entry;
pub mod user;

pub use calendar::{build_month_grid, month_weeks, DayEntry, MonthGrid};
pub use client::{Client, ClientChanges, NewClient};
pub use password::Password;
pub use period::MonthPeriod;
pub use project::{NewProject, Project, ProjectChanges};
pub use report::{ClientTotal, HistoryFilter, MonthlySummary};
pub use time_entry::{EntryFilter, EntryKey, Hours, SaveTimeEntry, TimeEntry, TimeEntryDetails};
pub use user::{User, UserActivity, UserResponse};
