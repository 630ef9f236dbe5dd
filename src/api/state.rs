//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CatalogService, ReportService, ServiceContainer, Services, TimeEntryService,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    /// Clients and projects
    pub catalog_service: Arc<dyn CatalogService>,
    pub time_entry_service: Arc<dyn TimeEntryService>,
    /// Aggregations, calendar and dashboard data
    pub report_service: Arc<dyn ReportService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container.
    ///
    /// Tests use this with a `MockServiceContainer`.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            catalog_service: container.catalog(),
            time_entry_service: container.time_entries(),
            report_service: container.reports(),
            database,
        }
    }
}
