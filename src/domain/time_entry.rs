//! Time entry entity and the value objects used to save one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::{DATE_FORMAT, MAX_HOURS_PER_ENTRY};
use crate::errors::{AppError, AppResult};

/// One unit of logged work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A time entry together with the names of its client and project.
///
/// Names are `None` when the related row is absent; substituting a
/// fallback label is left to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntryDetails {
    pub entry: TimeEntry,
    pub client_name: Option<String>,
    pub project_name: Option<String>,
}

/// Hours worked on a single entry, always in (0, 24].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Hours(f64);

impl Hours {
    pub fn new(value: f64) -> AppResult<Self> {
        if value.is_finite() && value > 0.0 && value <= MAX_HOURS_PER_ENTRY {
            Ok(Self(value))
        } else {
            Err(AppError::validation(format!(
                "Hours must be greater than 0 and at most {}",
                MAX_HOURS_PER_ENTRY
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Natural key of an entry: at most one row per combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
}

/// Validated input of a save action.
#[derive(Debug, Clone)]
pub struct SaveTimeEntry {
    pub key: EntryKey,
    pub hours: Hours,
    /// Trimmed; `None` when the caller left it blank.
    pub description: Option<String>,
}

impl SaveTimeEntry {
    pub fn new(
        user_id: Uuid,
        client_id: Uuid,
        project_id: Option<Uuid>,
        date: NaiveDate,
        hours: f64,
        description: Option<String>,
    ) -> AppResult<Self> {
        let hours = Hours::new(hours)?;
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            key: EntryKey {
                user_id,
                date,
                client_id,
                project_id,
            },
            hours,
            description,
        })
    }

    /// Description to store, defaulting to a line naming the client.
    pub fn description_or_default(&self, client_name: &str) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Work for {}", client_name))
    }
}

/// Optional predicates for listing a user's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub client_id: Option<Uuid>,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Parse an optional date query parameter; blank counts as absent.
pub fn parse_optional_date(value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v).map(Some),
        None => Ok(None),
    }
}
