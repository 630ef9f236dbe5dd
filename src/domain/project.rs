//! Project entity. A project belongs to exactly one client for its
//! whole lifetime.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub active: bool,
    /// Stored for invoicing outside this system; never used in totals.
    pub hourly_rate: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Fail unless this project is filed under `client_id`.
    pub fn ensure_belongs_to(&self, client_id: Uuid) -> AppResult<()> {
        if self.client_id == client_id {
            Ok(())
        } else {
            Err(AppError::validation(
                "The selected project does not belong to the selected client",
            ))
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub hourly_rate: Option<f64>,
}

/// Partial project update. Projects never move between clients.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub hourly_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_belongs_to() {
        let client_id = Uuid::new_v4();
        let project = Project {
            id: Uuid::new_v4(),
            name: "Website".to_string(),
            description: None,
            client_id,
            active: true,
            hourly_rate: Some(950.0),
            created_at: Utc::now(),
        };

        assert!(project.ensure_belongs_to(client_id).is_ok());
        assert!(matches!(
            project.ensure_belongs_to(Uuid::new_v4()),
            Err(AppError::Validation(_))
        ));
    }
}
