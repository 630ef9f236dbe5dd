//! Time entry service - saving, deleting and listing a user's entries.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{EntryFilter, SaveTimeEntry, TimeEntry, TimeEntryDetails};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait TimeEntryService: Send + Sync {
    /// Create an entry, or update the one already stored under the same
    /// (user, date, client, project).
    async fn save_entry(&self, input: SaveTimeEntry) -> AppResult<TimeEntry>;

    /// Delete an entry owned by `user_id`
    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<()>;

    /// All entries of the user on one date
    async fn entries_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<TimeEntryDetails>>;

    /// Entries of the user matching `filter`, newest first
    async fn list_entries(
        &self,
        user_id: Uuid,
        filter: EntryFilter,
    ) -> AppResult<Vec<TimeEntryDetails>>;
}

pub struct TimeEntryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TimeEntryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Check-then-write inside one transaction.
    async fn upsert(&self, input: &SaveTimeEntry, description: &str) -> AppResult<TimeEntry> {
        let key = input.key;
        let hours = input.hours.value();
        let description = description.to_string();

        with_transaction!(self.uow, |ctx| {
            let entries = ctx.time_entries();
            match entries.find_by_key(&key).await? {
                Some(existing) => entries.update(existing.id, hours, description).await,
                None => entries.insert(&key, hours, description).await,
            }
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> TimeEntryService for TimeEntryManager<U> {
    async fn save_entry(&self, input: SaveTimeEntry) -> AppResult<TimeEntry> {
        let client = self
            .uow
            .clients()
            .find_by_id(input.key.client_id)
            .await?
            .ok_or_not_found("Client")?;

        if let Some(project_id) = input.key.project_id {
            self.uow
                .projects()
                .find_by_id(project_id)
                .await?
                .ok_or_not_found("Project")?
                .ensure_belongs_to(client.id)?;
        }

        let description = input.description_or_default(&client.name);

        // A concurrent save of the same key may insert between our lookup and
        // our insert; the unique index rejects ours and the retry updates the
        // winner's row instead.
        let saved = match self.upsert(&input, &description).await {
            Err(e) if e.is_unique_violation() => {
                tracing::debug!(user_id = %input.key.user_id, "Lost insert race, retrying as update");
                self.upsert(&input, &description).await?
            }
            other => other?,
        };

        tracing::debug!(entry_id = %saved.id, user_id = %saved.user_id, "Saved time entry");
        Ok(saved)
    }

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<()> {
        if !self.uow.time_entries().delete_owned(user_id, entry_id).await? {
            return Err(AppError::not_found("Time entry"));
        }

        tracing::debug!(entry_id = %entry_id, user_id = %user_id, "Deleted time entry");
        Ok(())
    }

    async fn entries_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<TimeEntryDetails>> {
        let filter = EntryFilter {
            date_from: Some(date),
            date_to: Some(date),
            client_id: None,
        };
        self.uow.time_entries().list_details(user_id, &filter).await
    }

    async fn list_entries(
        &self,
        user_id: Uuid,
        filter: EntryFilter,
    ) -> AppResult<Vec<TimeEntryDetails>> {
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            if from > to {
                return Err(AppError::validation("date_from must not be after date_to"));
            }
        }

        self.uow.time_entries().list_details(user_id, &filter).await
    }
}
