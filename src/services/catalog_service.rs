//! Catalog service - clients and projects that time is booked against.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Client, ClientChanges, NewClient, NewProject, Project, ProjectChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Clients ordered by name; inactive ones only on request
    async fn list_clients(&self, include_inactive: bool) -> AppResult<Vec<Client>>;

    async fn get_client(&self, id: Uuid) -> AppResult<Client>;

    async fn create_client(&self, client: NewClient) -> AppResult<Client>;

    async fn update_client(&self, id: Uuid, changes: ClientChanges) -> AppResult<Client>;

    async fn list_projects(&self, include_inactive: bool) -> AppResult<Vec<Project>>;

    /// Active projects of one existing client
    async fn projects_for_client(&self, client_id: Uuid) -> AppResult<Vec<Project>>;

    async fn create_project(&self, project: NewProject) -> AppResult<Project>;

    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn required_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    Ok(name.to_string())
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn check_rate(rate: Option<f64>) -> AppResult<()> {
    match rate {
        Some(r) if !r.is_finite() || r < 0.0 => {
            Err(AppError::validation("Hourly rate must be zero or positive"))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list_clients(&self, include_inactive: bool) -> AppResult<Vec<Client>> {
        self.uow.clients().list(!include_inactive).await
    }

    async fn get_client(&self, id: Uuid) -> AppResult<Client> {
        self.uow
            .clients()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Client")
    }

    async fn create_client(&self, client: NewClient) -> AppResult<Client> {
        let client = NewClient {
            name: required_name(&client.name)?,
            description: clean_description(client.description),
        };

        let created = self.uow.clients().create(client).await?;
        tracing::info!(client_id = %created.id, "Created client");
        Ok(created)
    }

    async fn update_client(&self, id: Uuid, changes: ClientChanges) -> AppResult<Client> {
        let changes = ClientChanges {
            name: changes.name.as_deref().map(required_name).transpose()?,
            description: changes.description.map(|d| d.trim().to_string()),
            active: changes.active,
        };

        self.uow.clients().update(id, changes).await
    }

    async fn list_projects(&self, include_inactive: bool) -> AppResult<Vec<Project>> {
        self.uow.projects().list(!include_inactive).await
    }

    async fn projects_for_client(&self, client_id: Uuid) -> AppResult<Vec<Project>> {
        self.get_client(client_id).await?;
        self.uow.projects().list_by_client(client_id, true).await
    }

    async fn create_project(&self, project: NewProject) -> AppResult<Project> {
        check_rate(project.hourly_rate)?;
        let name = required_name(&project.name)?;
        self.get_client(project.client_id).await?;

        let created = self
            .uow
            .projects()
            .create(NewProject {
                name,
                description: clean_description(project.description),
                client_id: project.client_id,
                hourly_rate: project.hourly_rate,
            })
            .await?;

        tracing::info!(project_id = %created.id, client_id = %created.client_id, "Created project");
        Ok(created)
    }

    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project> {
        check_rate(changes.hourly_rate)?;
        let changes = ProjectChanges {
            name: changes.name.as_deref().map(required_name).transpose()?,
            description: changes.description.map(|d| d.trim().to_string()),
            active: changes.active,
            hourly_rate: changes.hourly_rate,
        };

        self.uow.projects().update(id, changes).await
    }
}
