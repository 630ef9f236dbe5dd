//! Project repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::project::{self, ActiveModel, Entity as ProjectEntity};
use crate::domain::{NewProject, Project, ProjectChanges};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>>;

    /// List projects ordered by name
    async fn list(&self, active_only: bool) -> AppResult<Vec<Project>>;

    /// List projects filed under one client
    async fn list_by_client(&self, client_id: Uuid, active_only: bool) -> AppResult<Vec<Project>>;

    async fn create(&self, project: NewProject) -> AppResult<Project>;

    async fn update(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct ProjectStore {
    db: DatabaseConnection,
}

impl ProjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, client_id: Option<Uuid>, active_only: bool) -> AppResult<Vec<Project>> {
        let mut query = ProjectEntity::find();
        if let Some(client_id) = client_id {
            query = query.filter(project::Column::ClientId.eq(client_id));
        }
        if active_only {
            query = query.filter(project::Column::Active.eq(true));
        }

        let models = query
            .order_by_asc(project::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Project::from).collect())
    }
}

#[async_trait]
impl ProjectRepository for ProjectStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        let result = ProjectEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Project::from))
    }

    async fn list(&self, active_only: bool) -> AppResult<Vec<Project>> {
        self.fetch(None, active_only).await
    }

    async fn list_by_client(&self, client_id: Uuid, active_only: bool) -> AppResult<Vec<Project>> {
        self.fetch(Some(client_id), active_only).await
    }

    async fn create(&self, project: NewProject) -> AppResult<Project> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(project.name),
            description: Set(project.description),
            client_id: Set(project.client_id),
            active: Set(true),
            hourly_rate: Set(project.hourly_rate),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Project::from(model))
    }

    async fn update(&self, id: Uuid, changes: ProjectChanges) -> AppResult<Project> {
        let existing = ProjectEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Project")?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description).filter(|d| !d.is_empty()));
        }
        if let Some(flag) = changes.active {
            active.active = Set(flag);
        }
        if let Some(rate) = changes.hourly_rate {
            active.hourly_rate = Set(Some(rate));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Project::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        ProjectEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
