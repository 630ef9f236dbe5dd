//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - Repositories over the SeaORM entities
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ClientRepository, ClientStore, ProjectRepository, ProjectStore, TimeEntryRepository,
    TimeEntryStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxTimeEntryRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockClientRepository, MockProjectRepository, MockTimeEntryRepository, MockUserRepository,
};
