//! Client (billable counterparty) entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Billable counterparty. Deactivated clients disappear from selection
/// lists but keep their historical entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new client
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub description: Option<String>,
}

/// Partial client update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}
