//! Time entry handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{collect, DayEntryResponse, EntryDetailsResponse, TimeEntryResponse};
use crate::api::extractors::{empty_string_as_none, ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::time_entry::{parse_date, parse_optional_date};
use crate::domain::{EntryFilter, SaveTimeEntry};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Save request; an existing entry with the same date, client and project
/// is updated in place
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveEntryRequest {
    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "Date is required"))]
    #[schema(example = "2025-03-10")]
    pub date: String,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    /// Greater than 0 and at most 24
    #[schema(example = 3.5)]
    pub hours: f64,
    /// Defaults to "Work for {client}" when blank
    #[schema(example = "Sprint planning")]
    pub description: Option<String>,
}

/// Optional filters, all combinable
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntryQuery {
    /// Inclusive start date, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`
    pub date_to: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub client_id: Option<Uuid>,
}

impl EntryQuery {
    pub fn into_filter(self) -> AppResult<EntryFilter> {
        Ok(EntryFilter {
            date_from: parse_optional_date(self.date_from.as_deref())?,
            date_to: parse_optional_date(self.date_to.as_deref())?,
            client_id: self.client_id,
        })
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    /// `YYYY-MM-DD`
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
}

pub fn time_entry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(save_entry))
        .route("/day", get(day_entries))
        .route("/:id", delete(delete_entry))
}

/// List the caller's entries, newest first
#[utoipa::path(
    get,
    path = "/time-entries",
    tag = "Time entries",
    security(("bearer_auth" = [])),
    params(EntryQuery),
    responses(
        (status = 200, description = "Entries", body = Vec<EntryDetailsResponse>),
        (status = 400, description = "Malformed filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_entries(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EntryQuery>,
) -> AppResult<Json<Vec<EntryDetailsResponse>>> {
    let entries = state
        .time_entry_service
        .list_entries(current_user.id, query.into_filter()?)
        .await?;

    Ok(Json(collect(entries)))
}

/// Save hours for a date, client and optional project
#[utoipa::path(
    post,
    path = "/time-entries",
    tag = "Time entries",
    security(("bearer_auth" = [])),
    request_body = SaveEntryRequest,
    responses(
        (status = 200, description = "Entry created or updated", body = TimeEntryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Client or project not found")
    )
)]
pub async fn save_entry(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SaveEntryRequest>,
) -> AppResult<Json<TimeEntryResponse>> {
    let input = SaveTimeEntry::new(
        current_user.id,
        payload.client_id,
        payload.project_id,
        parse_date(&payload.date)?,
        payload.hours,
        payload.description,
    )?;

    let entry = state.time_entry_service.save_entry(input).await?;
    Ok(Json(TimeEntryResponse::from(entry)))
}

/// Delete one of the caller's entries
#[utoipa::path(
    delete,
    path = "/time-entries/{id}",
    tag = "Time entries",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Time entry ID")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such entry owned by the caller")
    )
)]
pub async fn delete_entry(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .time_entry_service
        .delete_entry(current_user.id, id)
        .await?;

    Ok(NoContent)
}

/// Entries of the caller on one date
#[utoipa::path(
    get,
    path = "/time-entries/day",
    tag = "Time entries",
    security(("bearer_auth" = [])),
    params(DayQuery),
    responses(
        (status = 200, description = "Entries of the day", body = Vec<DayEntryResponse>),
        (status = 400, description = "Missing or malformed date"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn day_entries(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DayQuery>,
) -> AppResult<Json<Vec<DayEntryResponse>>> {
    let date = parse_date(&query.date)?;
    let entries = state
        .time_entry_service
        .entries_on(current_user.id, date)
        .await?;

    Ok(Json(entries.iter().map(DayEntryResponse::from).collect()))
}
