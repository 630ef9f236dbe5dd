//! User service - account administration and per-user statistics.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::try_join;
use uuid::Uuid;

use crate::domain::{User, UserActivity};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Headline counts for the administrator dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub users_count: u64,
    pub clients_count: u64,
    pub projects_count: u64,
    pub total_hours: f64,
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Entry count, total hours and last activity of one user
    async fn user_activity(&self, id: Uuid) -> AppResult<UserActivity>;

    /// Delete an account. Refused for the caller's own account and for
    /// users that still own time entries.
    async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> AppResult<()>;

    async fn overview(&self) -> AppResult<AdminOverview>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found("User")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn user_activity(&self, id: Uuid) -> AppResult<UserActivity> {
        self.get_user(id).await?;

        let entries = self.uow.time_entries();
        let (time_entries_count, total_hours, last_activity) = try_join!(
            entries.count_for_user(id),
            entries.sum_hours(id, None, None),
            entries.last_created_for_user(id),
        )?;

        Ok(UserActivity {
            time_entries_count,
            total_hours,
            last_activity,
        })
    }

    async fn delete_user(&self, actor_id: Uuid, id: Uuid) -> AppResult<()> {
        if actor_id == id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        self.get_user(id).await?;

        let entries = self.uow.time_entries().count_for_user(id).await?;
        if entries > 0 {
            tracing::warn!(user_id = %id, entries, "Refused to delete user with time entries");
            return Err(AppError::conflict(format!(
                "User still owns {} time entries and cannot be deleted",
                entries
            )));
        }

        self.uow.users().delete(id).await?;
        tracing::info!(user_id = %id, deleted_by = %actor_id, "Deleted user");
        Ok(())
    }

    async fn overview(&self) -> AppResult<AdminOverview> {
        let users = self.uow.users();
        let clients = self.uow.clients();
        let projects = self.uow.projects();
        let entries = self.uow.time_entries();

        let (users_count, clients_count, projects_count, total_hours) = try_join!(
            users.count(),
            clients.count(),
            projects.count(),
            entries.sum_all_hours(),
        )?;

        Ok(AdminOverview {
            users_count,
            clients_count,
            projects_count,
            total_hours,
        })
    }
}
