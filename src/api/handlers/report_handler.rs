//! Report and CSV export handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::time_entry_handler::EntryQuery;
use super::today;
use crate::api::dto::{
    collect, ClientResponse, EntryDetailsResponse, MonthlySummaryResponse, ProjectResponse,
};
use crate::api::extractors::{empty_string_as_none, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{EXPORT_ENTRIES_PREFIX, EXPORT_SUMMARY_PREFIX};
use crate::domain::HistoryFilter;
use crate::errors::AppResult;
use crate::utils::{entries_csv, export_filename, summary_csv, CsvExport};

/// History filters; each is optional and independent
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Exact year; an empty value means no year filter
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub year: Option<i32>,
    /// Case-insensitive part of the client name
    pub client: Option<String>,
    /// Case-insensitive part of the project name
    pub project: Option<String>,
}

impl From<HistoryQuery> for HistoryFilter {
    fn from(query: HistoryQuery) -> Self {
        HistoryFilter::new(query.year, query.client, query.project)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    /// All of the caller's entries, newest first
    pub entries: Vec<EntryDetailsResponse>,
    /// Hours per month, client and project
    pub summary: Vec<MonthlySummaryResponse>,
    /// Filter choices
    pub clients: Vec<ClientResponse>,
    pub projects: Vec<ProjectResponse>,
    /// Years having entries, most recent first
    pub years: Vec<i32>,
}

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/", get(reports))
}

pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/entries.csv", get(export_entries))
        .route("/summary.csv", get(export_summary))
}

/// Reports page data
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(HistoryQuery),
    responses(
        (status = 200, description = "Report data", body = ReportResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn reports(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HistoryQuery>,
) -> AppResult<Json<ReportResponse>> {
    let overview = state
        .report_service
        .report_overview(current_user.id, &HistoryFilter::from(query))
        .await?;

    Ok(Json(ReportResponse {
        entries: collect(overview.entries),
        summary: collect(overview.summary),
        clients: collect(overview.clients),
        projects: collect(overview.projects),
        years: overview.years,
    }))
}

/// Download the caller's entries as CSV
#[utoipa::path(
    get,
    path = "/exports/entries.csv",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(EntryQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn export_entries(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EntryQuery>,
) -> AppResult<CsvExport> {
    let entries = state
        .time_entry_service
        .list_entries(current_user.id, query.into_filter()?)
        .await?;

    tracing::debug!(user_id = %current_user.id, rows = entries.len(), "Exporting entries");
    Ok(CsvExport {
        filename: export_filename(EXPORT_ENTRIES_PREFIX, today()),
        body: entries_csv(&entries)?,
    })
}

/// Download the monthly summary as CSV
#[utoipa::path(
    get,
    path = "/exports/summary.csv",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(HistoryQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn export_summary(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HistoryQuery>,
) -> AppResult<CsvExport> {
    let records = state
        .report_service
        .monthly_summary(current_user.id, &HistoryFilter::from(query))
        .await?;

    tracing::debug!(user_id = %current_user.id, rows = records.len(), "Exporting summary");
    Ok(CsvExport {
        filename: export_filename(EXPORT_SUMMARY_PREFIX, today()),
        body: summary_csv(&records)?,
    })
}
