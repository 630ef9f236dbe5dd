//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours (one working day)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 8;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// User Roles
// =============================================================================

/// Role claim for regular users
pub const ROLE_USER: &str = "user";

/// Role claim for administrators
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://timesheet.db?mode=rwc";

// =============================================================================
// Seed Data
// =============================================================================

/// Administrator account created by `seed` when none exists
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@timesheet.local";

/// Initial administrator password (change after first login)
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Administrator display name
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Minimum name length requirement (after trimming)
pub const MIN_NAME_LENGTH: u64 = 2;

/// Upper bound (inclusive) for hours on a single entry
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

/// Date format used on the wire and as calendar keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used in exports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Reporting
// =============================================================================

/// First month that can be displayed on the dashboard
pub const EARLIEST_REPORT_YEAR: i32 = 2025;
pub const EARLIEST_REPORT_MONTH: u32 = 1;

/// Accepted year range for the calendar endpoints
pub const MIN_CALENDAR_YEAR: i32 = 1900;
pub const MAX_CALENDAR_YEAR: i32 = 2100;

/// Fallback label for entries whose client row is gone
pub const NO_CLIENT_LABEL: &str = "No client";

/// Fallback label for entries recorded without a project
pub const NO_PROJECT_LABEL: &str = "No project";

// =============================================================================
// Export
// =============================================================================

/// MIME type of exported tables
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Filename prefix for the raw entries export
pub const EXPORT_ENTRIES_PREFIX: &str = "time_entries";

/// Filename prefix for the monthly summary export
pub const EXPORT_SUMMARY_PREFIX: &str = "monthly_summary";
