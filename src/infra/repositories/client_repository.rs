//! Client repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::client::{self, ActiveModel, Entity as ClientEntity};
use crate::domain::{Client, ClientChanges, NewClient};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find client by ID, active or not
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>>;

    /// List clients ordered by name
    async fn list(&self, active_only: bool) -> AppResult<Vec<Client>>;

    async fn create(&self, client: NewClient) -> AppResult<Client>;

    async fn update(&self, id: Uuid, changes: ClientChanges) -> AppResult<Client>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        let result = ClientEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Client::from))
    }

    async fn list(&self, active_only: bool) -> AppResult<Vec<Client>> {
        let mut query = ClientEntity::find();
        if active_only {
            query = query.filter(client::Column::Active.eq(true));
        }

        let models = query
            .order_by_asc(client::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Client::from).collect())
    }

    async fn create(&self, client: NewClient) -> AppResult<Client> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(client.name),
            description: Set(client.description),
            active: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Client::from(model))
    }

    async fn update(&self, id: Uuid, changes: ClientChanges) -> AppResult<Client> {
        let existing = ClientEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Client")?;

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

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Client::from(model))
    }

    async fn count(&self) -> AppResult<u64> {
        ClientEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
