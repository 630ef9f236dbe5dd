//! Dashboard and calendar handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::today;
use crate::api::dto::{
    collect, ClientResponse, ClientTotalResponse, MonthGridResponse, ProjectResponse,
};
use crate::api::extractors::ValidatedQuery;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;

/// Month selection; both default to the current month
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    /// Four-digit year
    pub year: Option<i32>,
    /// Month number, 1-12
    pub month: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Displayed month after clamping
    pub calendar: MonthGridResponse,
    /// Hours per client in the displayed month, largest first
    pub client_totals: Vec<ClientTotalResponse>,
    /// Hours logged on today's date
    pub hours_today: f64,
    pub hours_this_month: f64,
    /// Active clients for quick entry
    pub clients: Vec<ClientResponse>,
    /// Active projects for quick entry
    pub projects: Vec<ProjectResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub calendar: MonthGridResponse,
    /// Zero unless today lies in the requested month
    pub hours_today: f64,
    pub hours_this_month: f64,
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/calendar", get(calendar))
}

/// Dashboard for one month, clamped to [2025-01, current month]
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Calendar",
    security(("bearer_auth" = [])),
    params(MonthQuery),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 400, description = "Invalid month"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn dashboard(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let data = state
        .report_service
        .dashboard(current_user.id, query.year, query.month, today())
        .await?;

    Ok(Json(DashboardResponse {
        calendar: MonthGridResponse::from(&data.grid),
        client_totals: collect(data.client_totals),
        hours_today: data.hours_today,
        hours_this_month: data.hours_this_month,
        clients: collect(data.clients),
        projects: collect(data.projects),
    }))
}

/// Calendar data for any month between 1900 and 2100
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "Calendar",
    security(("bearer_auth" = [])),
    params(MonthQuery),
    responses(
        (status = 200, description = "Calendar data", body = CalendarResponse),
        (status = 400, description = "Year or month out of range"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn calendar(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MonthQuery>,
) -> AppResult<Json<CalendarResponse>> {
    let today = today();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let data = state
        .report_service
        .calendar_data(current_user.id, year, month, today)
        .await?;

    Ok(Json(CalendarResponse {
        calendar: MonthGridResponse::from(&data.grid),
        hours_today: data.hours_today,
        hours_this_month: data.hours_this_month,
    }))
}
