//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages the transaction
//! lifecycle (begin, commit, rollback) for multi-step writes.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, EntityTrait, IsolationLevel, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::time_entry::{self, Entity as TimeEntryEntity};
use super::repositories::{
    key_condition, ClientRepository, ClientStore, ProjectRepository, ProjectStore,
    TimeEntryRepository, TimeEntryStore, UserRepository, UserStore,
};
use crate::domain::{EntryKey, TimeEntry};
use crate::errors::{AppError, AppResult, OptionExt};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, wrap repository mocks in a small test implementation or
/// use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn clients(&self) -> Arc<dyn ClientRepository>;

    fn projects(&self) -> Arc<dyn ProjectRepository>;

    fn time_entries(&self) -> Arc<dyn TimeEntryRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get time entry repository for this transaction
    pub fn time_entries(&self) -> TxTimeEntryRepository<'_> {
        TxTimeEntryRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    client_repo: Arc<ClientStore>,
    project_repo: Arc<ProjectStore>,
    time_entry_repo: Arc<TimeEntryStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            client_repo: Arc::new(ClientStore::new(db.clone())),
            project_repo: Arc::new(ProjectStore::new(db.clone())),
            time_entry_repo: Arc::new(TimeEntryStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.client_repo.clone()
    }

    fn projects(&self) -> Arc<dyn ProjectRepository> {
        self.project_repo.clone()
    }

    fn time_entries(&self) -> Arc<dyn TimeEntryRepository> {
        self.time_entry_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = if supports_transaction_config(self.db.get_database_backend()) {
            self.db
                .begin_with_config(
                    Some(IsolationLevel::ReadCommitted),
                    Some(AccessMode::ReadWrite),
                )
                .await
        } else {
            self.db.begin().await
        }
        .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// SQLite has no `SET TRANSACTION`; its transactions are serializable.
fn supports_transaction_config(backend: DbBackend) -> bool {
    !matches!(backend, DbBackend::Sqlite)
}

/// Transaction-aware time entry repository.
///
/// Holds the write side of the save-or-update path.
pub struct TxTimeEntryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxTimeEntryRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_key(&self, key: &EntryKey) -> AppResult<Option<TimeEntry>> {
        let result = key_condition(TimeEntryEntity::find(), key)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TimeEntry::from))
    }

    pub async fn insert(
        &self,
        key: &EntryKey,
        hours: f64,
        description: String,
    ) -> AppResult<TimeEntry> {
        let now = Utc::now();
        let active_model = time_entry::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(key.user_id),
            client_id: Set(key.client_id),
            project_id: Set(key.project_id),
            date: Set(key.date),
            hours: Set(hours),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(TimeEntry::from(model))
    }

    /// Overwrite hours and description of an existing entry
    pub async fn update(&self, id: Uuid, hours: f64, description: String) -> AppResult<TimeEntry> {
        let existing = TimeEntryEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or_not_found("Time entry")?;

        let mut active: time_entry::ActiveModel = existing.into();
        active.hours = Set(hours);
        active.description = Set(description);
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(TimeEntry::from(model))
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
