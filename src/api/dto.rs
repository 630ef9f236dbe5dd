//! Response bodies shared by the handlers.
//!
//! Domain types carry optional client/project names; the fallback labels
//! are substituted here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{NO_CLIENT_LABEL, NO_PROJECT_LABEL};
use crate::domain::{
    Client, ClientTotal, DayEntry, MonthGrid, MonthlySummary, Project, TimeEntry,
    TimeEntryDetails,
};

pub fn client_label(name: Option<&str>) -> String {
    name.unwrap_or(NO_CLIENT_LABEL).to_string()
}

pub fn project_label(name: Option<&str>) -> String {
    name.unwrap_or(NO_PROJECT_LABEL).to_string()
}

/// A stored time entry
#[derive(Debug, Serialize, ToSchema)]
pub struct TimeEntryResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    #[schema(value_type = String, example = "2025-03-10")]
    pub date: NaiveDate,
    #[schema(example = 3.5)]
    pub hours: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TimeEntry> for TimeEntryResponse {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id,
            client_id: entry.client_id,
            project_id: entry.project_id,
            date: entry.date,
            hours: entry.hours,
            description: entry.description,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// A time entry with display names
#[derive(Debug, Serialize, ToSchema)]
pub struct EntryDetailsResponse {
    #[serde(flatten)]
    pub entry: TimeEntryResponse,
    #[schema(example = "Acme")]
    pub client_name: String,
    #[schema(example = "Website")]
    pub project_name: String,
}

impl From<TimeEntryDetails> for EntryDetailsResponse {
    fn from(details: TimeEntryDetails) -> Self {
        Self {
            client_name: client_label(details.client_name.as_deref()),
            project_name: project_label(details.project_name.as_deref()),
            entry: TimeEntryResponse::from(details.entry),
        }
    }
}

/// One entry inside a calendar day
#[derive(Debug, Serialize, ToSchema)]
pub struct DayEntryResponse {
    pub id: Uuid,
    pub hours: f64,
    pub description: String,
    pub client_name: String,
    pub project_name: String,
}

impl From<&DayEntry> for DayEntryResponse {
    fn from(entry: &DayEntry) -> Self {
        Self {
            id: entry.id,
            hours: entry.hours,
            description: entry.description.clone(),
            client_name: client_label(entry.client_name.as_deref()),
            project_name: project_label(entry.project_name.as_deref()),
        }
    }
}

impl From<&TimeEntryDetails> for DayEntryResponse {
    fn from(details: &TimeEntryDetails) -> Self {
        Self::from(&DayEntry::from(details))
    }
}

/// Month laid out in Monday-first weeks
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthGridResponse {
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
    #[schema(example = "March 2025")]
    pub month_label: String,
    pub days_in_month: u32,
    /// Day numbers per week, 0 for cells outside the month
    pub weeks: Vec<Vec<u32>>,
    /// Entries keyed by `YYYY-MM-DD`; days without entries are absent
    pub entries_by_date: BTreeMap<String, Vec<DayEntryResponse>>,
}

impl From<&MonthGrid> for MonthGridResponse {
    fn from(grid: &MonthGrid) -> Self {
        Self {
            year: grid.period.year(),
            month: grid.period.month(),
            month_label: grid.period.label(),
            days_in_month: grid.period.days_in_month(),
            weeks: grid.weeks.iter().map(|w| w.to_vec()).collect(),
            entries_by_date: grid
                .entries_by_date
                .iter()
                .map(|(date, entries)| {
                    (date.clone(), entries.iter().map(DayEntryResponse::from).collect())
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientTotalResponse {
    pub client_id: Uuid,
    pub client_name: String,
    pub total_hours: f64,
}

impl From<ClientTotal> for ClientTotalResponse {
    fn from(total: ClientTotal) -> Self {
        Self {
            client_id: total.client_id,
            client_name: client_label(total.client_name.as_deref()),
            total_hours: total.total_hours,
        }
    }
}

/// Hours of one (month, client, project) group
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlySummaryResponse {
    #[schema(example = "March 2025")]
    pub month_label: String,
    #[schema(example = "2025-03")]
    pub month_key: String,
    pub client_name: String,
    pub project_name: String,
    pub total_hours: f64,
}

impl From<MonthlySummary> for MonthlySummaryResponse {
    fn from(record: MonthlySummary) -> Self {
        Self {
            month_label: record.month_label(),
            month_key: record.month_key(),
            client_name: client_label(record.client_name.as_deref()),
            project_name: project_label(record.project_name.as_deref()),
            total_hours: record.total_hours,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientResponse {
    pub id: Uuid,
    #[schema(example = "Acme")]
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            description: client.description,
            active: client.active,
            created_at: client.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    #[schema(example = "Website")]
    pub name: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub active: bool,
    #[schema(example = 950.0)]
    pub hourly_rate: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            client_id: project.client_id,
            active: project.active,
            hourly_rate: project.hourly_rate,
            created_at: project.created_at,
        }
    }
}

pub fn collect<T, R: From<T>>(items: Vec<T>) -> Vec<R> {
    items.into_iter().map(R::from).collect()
}
