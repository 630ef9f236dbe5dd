//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod client;
pub mod project;
pub mod time_entry;
pub mod user;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use client::{ActiveModel as ClientActiveModel, Entity as ClientEntity, Model as ClientModel};
#[allow(unused_imports)]
pub use project::{ActiveModel as ProjectActiveModel, Entity as ProjectEntity, Model as ProjectModel};
#[allow(unused_imports)]
pub use time_entry::{
    ActiveModel as TimeEntryActiveModel, Entity as TimeEntryEntity, Model as TimeEntryModel,
};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
