//! HTTP request handlers.

use chrono::{Local, NaiveDate};

pub mod admin_handler;
pub mod auth_handler;
pub mod catalog_handler;
pub mod dashboard_handler;
pub mod report_handler;
pub mod time_entry_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::{auth_routes, profile_routes};
pub use catalog_handler::catalog_routes;
pub use dashboard_handler::dashboard_routes;
pub use report_handler::{export_routes, report_routes};
pub use time_entry_handler::time_entry_routes;

/// Local calendar date of the server, passed explicitly into services.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
