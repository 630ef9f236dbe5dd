//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::dto::{
    ClientResponse, ClientTotalResponse, DayEntryResponse, EntryDetailsResponse,
    MonthGridResponse, MonthlySummaryResponse, ProjectResponse, TimeEntryResponse,
};
use crate::api::handlers::{
    admin_handler, auth_handler, catalog_handler, dashboard_handler, report_handler,
    time_entry_handler,
};
use crate::domain::UserResponse;
use crate::services::TokenResponse;

/// OpenAPI documentation for the Timesheet API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timesheet API",
        version = "0.1.0",
        description = "Time tracking against clients and projects with calendar, monthly reports and CSV export",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // Calendar
        dashboard_handler::dashboard,
        dashboard_handler::calendar,
        // Time entries
        time_entry_handler::list_entries,
        time_entry_handler::save_entry,
        time_entry_handler::delete_entry,
        time_entry_handler::day_entries,
        // Reports and exports
        report_handler::reports,
        report_handler::export_entries,
        report_handler::export_summary,
        // Selection lists
        catalog_handler::list_active_clients,
        catalog_handler::list_client_projects,
        // Administration
        admin_handler::overview,
        admin_handler::list_users,
        admin_handler::get_user,
        admin_handler::delete_user,
        admin_handler::list_clients,
        admin_handler::create_client,
        admin_handler::update_client,
        admin_handler::list_projects,
        admin_handler::create_project,
        admin_handler::update_project,
    ),
    components(
        schemas(
            UserResponse,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            // Calendar and reports
            MonthGridResponse,
            DayEntryResponse,
            ClientTotalResponse,
            MonthlySummaryResponse,
            dashboard_handler::DashboardResponse,
            dashboard_handler::CalendarResponse,
            report_handler::ReportResponse,
            // Entries
            TimeEntryResponse,
            EntryDetailsResponse,
            time_entry_handler::SaveEntryRequest,
            // Catalog
            ClientResponse,
            ProjectResponse,
            // Admin
            admin_handler::OverviewResponse,
            admin_handler::UserDetailsResponse,
            admin_handler::CreateClientRequest,
            admin_handler::UpdateClientRequest,
            admin_handler::CreateProjectRequest,
            admin_handler::UpdateProjectRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Calendar", description = "Dashboard and month calendar"),
        (name = "Time entries", description = "Saving, listing and deleting hours"),
        (name = "Reports", description = "Monthly summaries and CSV exports"),
        (name = "Catalog", description = "Active clients and projects for selection lists"),
        (name = "Admin", description = "Administration of users, clients and projects")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
