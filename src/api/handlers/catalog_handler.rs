//! Selection lists of clients and projects.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::dto::{collect, ClientResponse, ProjectResponse};
use crate::api::AppState;
use crate::errors::AppResult;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active_clients))
        .route("/:id/projects", get(list_client_projects))
}

/// Active clients
#[utoipa::path(
    get,
    path = "/clients",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active clients", body = Vec<ClientResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_active_clients(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    let clients = state.catalog_service.list_clients(false).await?;
    Ok(Json(collect(clients)))
}

/// Active projects of one client
#[utoipa::path(
    get,
    path = "/clients/{id}/projects",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Projects of the client", body = Vec<ProjectResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn list_client_projects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = state.catalog_service.projects_for_client(id).await?;
    Ok(Json(collect(projects)))
}
