//! Shared fixtures for integration tests: an in-memory SQLite database with
//! all migrations applied.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use timesheet::config::Config;
use timesheet::domain::{Client, NewClient, NewProject, Password, Project, User};
use timesheet::infra::{Database, Persistence, UnitOfWork};

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

pub async fn database() -> Database {
    Database::in_memory()
        .await
        .expect("in-memory database with migrations")
}

pub fn test_config() -> Config {
    Config::new("sqlite::memory:", TEST_JWT_SECRET)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub async fn create_user(uow: &Persistence, email: &str) -> User {
    let password = Password::new("secret1").expect("password");
    uow.users()
        .create(
            "Test User".to_string(),
            email.to_string(),
            password.into_string(),
            false,
        )
        .await
        .expect("user")
}

pub async fn create_client(uow: &Persistence, name: &str) -> Client {
    uow.clients()
        .create(NewClient {
            name: name.to_string(),
            description: None,
        })
        .await
        .expect("client")
}

pub async fn create_project(uow: &Persistence, client_id: Uuid, name: &str) -> Project {
    uow.projects()
        .create(NewProject {
            name: name.to_string(),
            description: None,
            client_id,
            hourly_rate: Some(950.0),
        })
        .await
        .expect("project")
}

pub fn persistence(db: &Database) -> Arc<Persistence> {
    Arc::new(Persistence::new(db.get_connection()))
}
