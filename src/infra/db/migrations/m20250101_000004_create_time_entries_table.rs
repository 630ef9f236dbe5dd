//! Migration: Create time_entries table.
//!
//! The unique index on (user_id, date, client_id, project_id) backs the
//! save-or-update path. Rows without a project are not covered by it:
//! both PostgreSQL and SQLite treat NULLs as distinct in unique indexes.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users_table::Users;
use super::m20250101_000002_create_clients_table::Clients;
use super::m20250101_000003_create_projects_table::Projects;

const UNIQUE_KEY_INDEX: &str = "idx_time_entries_natural_key";
const USER_DATE_INDEX: &str = "idx_time_entries_user_date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeEntries::UserId).uuid().not_null())
                    .col(ColumnDef::new(TimeEntries::ClientId).uuid().not_null())
                    .col(ColumnDef::new(TimeEntries::ProjectId).uuid().null())
                    .col(ColumnDef::new(TimeEntries::Date).date().not_null())
                    .col(ColumnDef::new(TimeEntries::Hours).double().not_null())
                    .col(ColumnDef::new(TimeEntries::Description).text().not_null())
                    .col(
                        ColumnDef::new(TimeEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_entries_user_id")
                            .from(TimeEntries::Table, TimeEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_entries_client_id")
                            .from(TimeEntries::Table, TimeEntries::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_entries_project_id")
                            .from(TimeEntries::Table, TimeEntries::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(USER_DATE_INDEX)
                    .table(TimeEntries::Table)
                    .col(TimeEntries::UserId)
                    .col(TimeEntries::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_KEY_INDEX)
                    .table(TimeEntries::Table)
                    .col(TimeEntries::UserId)
                    .col(TimeEntries::Date)
                    .col(TimeEntries::ClientId)
                    .col(TimeEntries::ProjectId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TimeEntries {
    Table,
    Id,
    UserId,
    ClientId,
    ProjectId,
    Date,
    Hours,
    Description,
    CreatedAt,
    UpdatedAt,
}
