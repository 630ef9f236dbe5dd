//! Administrator handlers: overview, users and the client/project catalog.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::{collect, ClientResponse, ProjectResponse};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{ClientChanges, NewClient, NewProject, ProjectChanges, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub users_count: u64,
    pub clients_count: u64,
    pub projects_count: u64,
    /// Hours logged by all users
    pub total_hours: f64,
}

/// User profile with activity figures
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailsResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub time_entries_count: u64,
    pub total_hours: f64,
    /// Creation time of the user's latest entry
    pub last_activity: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Acme")]
    pub name: String,
    pub description: Option<String>,
}

/// Omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Website")]
    pub name: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    #[validate(range(min = 0.0, message = "Hourly rate must be zero or positive"))]
    #[schema(example = 950.0)]
    pub hourly_rate: Option<f64>,
}

/// Omitted fields are left unchanged; the owning client cannot change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    #[validate(range(min = 0.0, message = "Hourly rate must be zero or positive"))]
    pub hourly_rate: Option<f64>,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/overview", get(overview))
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user).delete(delete_user))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:id", put(update_client))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/:id", put(update_project))
}

/// Headline counts
#[utoipa::path(
    get,
    path = "/admin/overview",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts and total hours", body = OverviewResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn overview(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<OverviewResponse>> {
    require_admin(&current_user)?;
    let overview = state.user_service.overview().await?;

    Ok(Json(OverviewResponse {
        users_count: overview.users_count,
        clients_count: overview.clients_count,
        projects_count: overview.projects_count,
        total_hours: overview.total_hours,
    }))
}

/// List all users
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_admin(&current_user)?;
    let users = state.user_service.list_users().await?;
    Ok(Json(collect(users)))
}

/// User details with activity
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDetailsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserDetailsResponse>> {
    require_admin(&current_user)?;
    let user = state.user_service.get_user(id).await?;
    let activity = state.user_service.user_activity(id).await?;

    Ok(Json(UserDetailsResponse {
        user: UserResponse::from(user),
        time_entries_count: activity.time_entries_count,
        total_hours: activity.total_hours,
        last_activity: activity.last_activity,
    }))
}

/// Delete a user without time entries
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still owns time entries")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.user_service.delete_user(current_user.id, id).await?;
    Ok(NoContent)
}

/// All clients, including inactive ones
#[utoipa::path(
    get,
    path = "/admin/clients",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All clients", body = Vec<ClientResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_clients(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    require_admin(&current_user)?;
    let clients = state.catalog_service.list_clients(true).await?;
    Ok(Json(collect(clients)))
}

#[utoipa::path(
    post,
    path = "/admin/clients",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = ClientResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_client(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateClientRequest>,
) -> AppResult<Created<ClientResponse>> {
    require_admin(&current_user)?;
    let client = state
        .catalog_service
        .create_client(NewClient {
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok(Created(ClientResponse::from(client)))
}

#[utoipa::path(
    put,
    path = "/admin/clients/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Client ID")
    ),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = ClientResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateClientRequest>,
) -> AppResult<Json<ClientResponse>> {
    require_admin(&current_user)?;
    let client = state
        .catalog_service
        .update_client(
            id,
            ClientChanges {
                name: payload.name,
                description: payload.description,
                active: payload.active,
            },
        )
        .await?;

    Ok(Json(ClientResponse::from(client)))
}

/// All projects, including inactive ones
#[utoipa::path(
    get,
    path = "/admin/projects",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All projects", body = Vec<ProjectResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_projects(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    require_admin(&current_user)?;
    let projects = state.catalog_service.list_projects(true).await?;
    Ok(Json(collect(projects)))
}

#[utoipa::path(
    post,
    path = "/admin/projects",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn create_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> AppResult<Created<ProjectResponse>> {
    require_admin(&current_user)?;
    let project = state
        .catalog_service
        .create_project(NewProject {
            name: payload.name,
            description: payload.description,
            client_id: payload.client_id,
            hourly_rate: payload.hourly_rate,
        })
        .await?;

    Ok(Created(ProjectResponse::from(project)))
}

#[utoipa::path(
    put,
    path = "/admin/projects/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    require_admin(&current_user)?;
    let project = state
        .catalog_service
        .update_project(
            id,
            ProjectChanges {
                name: payload.name,
                description: payload.description,
                active: payload.active,
                hourly_rate: payload.hourly_rate,
            },
        )
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}
