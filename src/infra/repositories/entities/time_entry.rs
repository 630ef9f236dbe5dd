//! Time entry database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;

use crate::domain::{TimeEntry, TimeEntryDetails};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "time_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    pub date: Date,
    #[sea_orm(column_type = "Double")]
    pub hours: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TimeEntry {
    fn from(model: Model) -> Self {
        TimeEntry {
            id: model.id,
            user_id: model.user_id,
            client_id: model.client_id,
            project_id: model.project_id,
            date: model.date,
            hours: model.hours,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Entry row joined with its client and project names.
#[derive(Debug, FromQueryResult)]
pub struct DetailsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub project_id: Option<Uuid>,
    pub date: Date,
    pub hours: f64,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub client_name: Option<String>,
    pub project_name: Option<String>,
}

impl From<DetailsRow> for TimeEntryDetails {
    fn from(row: DetailsRow) -> Self {
        TimeEntryDetails {
            entry: TimeEntry {
                id: row.id,
                user_id: row.user_id,
                client_id: row.client_id,
                project_id: row.project_id,
                date: row.date,
                hours: row.hours,
                description: row.description,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            client_name: row.client_name,
            project_name: row.project_name,
        }
    }
}
