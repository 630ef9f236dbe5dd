//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod client_repository;
pub(crate) mod entities;
mod project_repository;
mod time_entry_repository;
mod user_repository;

pub use client_repository::{ClientRepository, ClientStore};
pub use project_repository::{ProjectRepository, ProjectStore};
pub use time_entry_repository::{TimeEntryRepository, TimeEntryStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use time_entry_repository::key_condition;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use client_repository::MockClientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use project_repository::MockProjectRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use time_entry_repository::MockTimeEntryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
