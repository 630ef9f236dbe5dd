//! Time entry repository implementation.
//!
//! Every read takes the owning user's id and applies it as a query
//! predicate, so rows of other users never leave the store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use super::entities::{client, project};
use super::entities::time_entry::{self, DetailsRow, Entity as TimeEntryEntity};
use crate::domain::{EntryFilter, EntryKey, TimeEntry, TimeEntryDetails};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    /// Find an entry by ID if it belongs to `user_id`
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<TimeEntry>>;

    /// Find the entry stored under a natural key
    async fn find_by_key(&self, key: &EntryKey) -> AppResult<Option<TimeEntry>>;

    /// Entries of one user with client and project names, newest first
    async fn list_details(
        &self,
        user_id: Uuid,
        filter: &EntryFilter,
    ) -> AppResult<Vec<TimeEntryDetails>>;

    /// Sum of hours of one user within an inclusive date range; zero when empty
    async fn sum_hours(
        &self,
        user_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<f64>;

    /// Sum of hours over every user
    async fn sum_all_hours(&self) -> AppResult<f64>;

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Creation time of the user's most recently created entry
    async fn last_created_for_user(&self, user_id: Uuid) -> AppResult<Option<DateTime<Utc>>>;

    /// Distinct dates the user has entries on
    async fn entry_dates(&self, user_id: Uuid) -> AppResult<Vec<NaiveDate>>;

    /// Delete an entry owned by `user_id`; false when nothing matched
    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

pub struct TimeEntryStore {
    db: DatabaseConnection,
}

impl TimeEntryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Entries of `user_id` left-joined with client and project names.
fn details_query(user_id: Uuid) -> Select<TimeEntryEntity> {
    TimeEntryEntity::find()
        .column_as(client::Column::Name, "client_name")
        .column_as(project::Column::Name, "project_name")
        .join(JoinType::LeftJoin, time_entry::Relation::Client.def())
        .join(JoinType::LeftJoin, time_entry::Relation::Project.def())
        .filter(time_entry::Column::UserId.eq(user_id))
}

pub(crate) fn key_condition(query: Select<TimeEntryEntity>, key: &EntryKey) -> Select<TimeEntryEntity> {
    let query = query
        .filter(time_entry::Column::UserId.eq(key.user_id))
        .filter(time_entry::Column::Date.eq(key.date))
        .filter(time_entry::Column::ClientId.eq(key.client_id));

    match key.project_id {
        Some(project_id) => query.filter(time_entry::Column::ProjectId.eq(project_id)),
        None => query.filter(time_entry::Column::ProjectId.is_null()),
    }
}

#[async_trait]
impl TimeEntryRepository for TimeEntryStore {
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<TimeEntry>> {
        let result = TimeEntryEntity::find_by_id(id)
            .filter(time_entry::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TimeEntry::from))
    }

    async fn find_by_key(&self, key: &EntryKey) -> AppResult<Option<TimeEntry>> {
        let result = key_condition(TimeEntryEntity::find(), key)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TimeEntry::from))
    }

    async fn list_details(
        &self,
        user_id: Uuid,
        filter: &EntryFilter,
    ) -> AppResult<Vec<TimeEntryDetails>> {
        let mut query = details_query(user_id);
        if let Some(from) = filter.date_from {
            query = query.filter(time_entry::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(time_entry::Column::Date.lte(to));
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(time_entry::Column::ClientId.eq(client_id));
        }

        let rows = query
            .order_by_desc(time_entry::Column::Date)
            .order_by_desc(time_entry::Column::CreatedAt)
            .into_model::<DetailsRow>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(TimeEntryDetails::from).collect())
    }

    async fn sum_hours(
        &self,
        user_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<f64> {
        let mut query = TimeEntryEntity::find()
            .select_only()
            .column_as(time_entry::Column::Hours.sum(), "total")
            .filter(time_entry::Column::UserId.eq(user_id));
        if let Some(from) = from {
            query = query.filter(time_entry::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(time_entry::Column::Date.lte(to));
        }

        let total = query
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(total.flatten().unwrap_or(0.0))
    }

    async fn sum_all_hours(&self) -> AppResult<f64> {
        let total = TimeEntryEntity::find()
            .select_only()
            .column_as(time_entry::Column::Hours.sum(), "total")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(total.flatten().unwrap_or(0.0))
    }

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        TimeEntryEntity::find()
            .filter(time_entry::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn last_created_for_user(&self, user_id: Uuid) -> AppResult<Option<DateTime<Utc>>> {
        let latest = TimeEntryEntity::find()
            .filter(time_entry::Column::UserId.eq(user_id))
            .order_by_desc(time_entry::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(latest.map(|model| model.created_at))
    }

    async fn entry_dates(&self, user_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        TimeEntryEntity::find()
            .select_only()
            .column(time_entry::Column::Date)
            .distinct()
            .filter(time_entry::Column::UserId.eq(user_id))
            .into_tuple::<NaiveDate>()
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = TimeEntryEntity::delete_many()
            .filter(time_entry::Column::Id.eq(id))
            .filter(time_entry::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
