//! Unit-test helpers: a Unit of Work over repository mocks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{Client, Project, TimeEntry, TimeEntryDetails, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    ClientRepository, MockClientRepository, MockProjectRepository, MockTimeEntryRepository,
    MockUserRepository, ProjectRepository, TimeEntryRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

/// Unit of Work backed by mocks. Repositories without configured
/// expectations panic when called.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    clients: Arc<MockClientRepository>,
    projects: Arc<MockProjectRepository>,
    time_entries: Arc<MockTimeEntryRepository>,
}

impl TestUnitOfWork {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            clients: Arc::new(MockClientRepository::new()),
            projects: Arc::new(MockProjectRepository::new()),
            time_entries: Arc::new(MockTimeEntryRepository::new()),
        }
    }

    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_clients(mut self, repo: MockClientRepository) -> Self {
        self.clients = Arc::new(repo);
        self
    }

    pub fn with_projects(mut self, repo: MockProjectRepository) -> Self {
        self.projects = Arc::new(repo);
        self
    }

    pub fn with_time_entries(mut self, repo: MockTimeEntryRepository) -> Self {
        self.time_entries = Arc::new(repo);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn clients(&self) -> Arc<dyn ClientRepository> {
        self.clients.clone()
    }

    fn projects(&self) -> Arc<dyn ProjectRepository> {
        self.projects.clone()
    }

    fn time_entries(&self) -> Arc<dyn TimeEntryRepository> {
        self.time_entries.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn sample_user(is_admin: bool) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password_hash: "hashed".to_string(),
        is_admin,
        created_at: Utc::now(),
    }
}

pub fn sample_client(name: &str) -> Client {
    Client {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        active: true,
        created_at: Utc::now(),
    }
}

pub fn sample_project(name: &str, client_id: Uuid) -> Project {
    Project {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        client_id,
        active: true,
        hourly_rate: None,
        created_at: Utc::now(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn details(
    client: &Client,
    project: Option<&Project>,
    date: NaiveDate,
    hours: f64,
) -> TimeEntryDetails {
    TimeEntryDetails {
        entry: TimeEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            client_id: client.id,
            project_id: project.map(|p| p.id),
            date,
            hours,
            description: "work".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        client_name: Some(client.name.clone()),
        project_name: project.map(|p| p.name.clone()),
    }
}
