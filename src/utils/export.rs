//! CSV export of raw entries and monthly summaries.
//!
//! Comma separated, `\n` terminated, fields quoted only when they contain
//! a delimiter, quote or newline. Missing client/project names are written
//! as the fallback labels.

use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;

use crate::config::{
    CSV_CONTENT_TYPE, DATE_FORMAT, NO_CLIENT_LABEL, NO_PROJECT_LABEL, TIMESTAMP_FORMAT,
};
use crate::domain::{MonthlySummary, TimeEntryDetails};
use crate::errors::{AppError, AppResult};

const ENTRIES_HEADER: [&str; 6] = ["Date", "Client", "Project", "Hours", "Description", "Created"];
const SUMMARY_HEADER: [&str; 4] = ["Month", "Client", "Project", "Total hours"];

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV is not UTF-8: {}", e)))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::internal(format!("CSV write failed: {}", e))
}

/// One row per entry, hours with two decimals.
pub fn entries_csv(entries: &[TimeEntryDetails]) -> AppResult<String> {
    let mut out = writer();
    out.write_record(ENTRIES_HEADER).map_err(csv_error)?;

    for details in entries {
        let entry = &details.entry;
        out.write_record([
            entry.date.format(DATE_FORMAT).to_string().as_str(),
            details.client_name.as_deref().unwrap_or(NO_CLIENT_LABEL),
            details.project_name.as_deref().unwrap_or(NO_PROJECT_LABEL),
            format!("{:.2}", entry.hours).as_str(),
            entry.description.as_str(),
            entry.created_at.format(TIMESTAMP_FORMAT).to_string().as_str(),
        ])
        .map_err(csv_error)?;
    }

    finish(out)
}

/// One row per (month, client, project) group, hours with one decimal.
pub fn summary_csv(records: &[MonthlySummary]) -> AppResult<String> {
    let mut out = writer();
    out.write_record(SUMMARY_HEADER).map_err(csv_error)?;

    for record in records {
        out.write_record([
            record.month_key().as_str(),
            record.client_name.as_deref().unwrap_or(NO_CLIENT_LABEL),
            record.project_name.as_deref().unwrap_or(NO_PROJECT_LABEL),
            format!("{:.1}", record.total_hours).as_str(),
        ])
        .map_err(csv_error)?;
    }

    finish(out)
}

/// `prefix_YYYYMMDD.csv`
pub fn export_filename(prefix: &str, today: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, today.format("%Y%m%d"))
}

/// Finished CSV payload served as a download.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

impl IntoResponse for CsvExport {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (CONTENT_TYPE, format!("{}; charset=utf-8", CSV_CONTENT_TYPE)),
                (CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MonthPeriod, TimeEntry};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn details(hours: f64, description: &str, project: Option<&str>) -> TimeEntryDetails {
        let created = Utc.with_ymd_and_hms(2025, 3, 10, 14, 5, 9).unwrap();
        TimeEntryDetails {
            entry: TimeEntry {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                project_id: None,
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                hours,
                description: description.to_string(),
                created_at: created,
                updated_at: created,
            },
            client_name: Some("Acme".to_string()),
            project_name: project.map(str::to_string),
        }
    }

    #[test]
    fn test_entries_csv_has_header_plus_one_line_per_entry() {
        let entries = vec![
            details(3.5, "Planning", None),
            details(2.0, "Build", Some("Website")),
            details(0.25, "Call", Some("Website")),
        ];
        let csv = entries_csv(&entries).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), entries.len() + 1);
        assert_eq!(lines[0], "Date,Client,Project,Hours,Description,Created");
        assert_eq!(lines[1], "2025-03-10,Acme,No project,3.50,Planning,2025-03-10 14:05:09");
        assert_eq!(lines[3], "2025-03-10,Acme,Website,0.25,Call,2025-03-10 14:05:09");
    }

    #[test]
    fn test_entries_csv_quotes_embedded_delimiters() {
        let csv = entries_csv(&[details(1.0, "Fix \"login\", then deploy", None)]).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.contains("\"Fix \"\"login\"\", then deploy\""));
    }

    #[test]
    fn test_entries_csv_empty_is_header_only() {
        let csv = entries_csv(&[]).unwrap();
        assert_eq!(csv, "Date,Client,Project,Hours,Description,Created\n");
    }

    #[test]
    fn test_summary_csv_formats_month_and_one_decimal() {
        let records = vec![MonthlySummary {
            period: MonthPeriod::new(2025, 3).unwrap(),
            client_name: Some("Acme".to_string()),
            project_name: None,
            total_hours: 5.5,
        }];
        let csv = summary_csv(&records).unwrap();

        assert_eq!(
            csv,
            "Month,Client,Project,Total hours\n2025-03,Acme,No project,5.5\n"
        );
    }

    #[test]
    fn test_export_filename() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(
            export_filename("time_entries", today),
            "time_entries_20250309.csv"
        );
    }

    #[test]
    fn test_csv_response_headers() {
        let response = CsvExport {
            filename: "monthly_summary_20250309.csv".to_string(),
            body: "Month\n".to_string(),
        }
        .into_response();

        let headers = response.headers();
        assert!(headers[CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
        assert_eq!(
            headers[CONTENT_DISPOSITION],
            "attachment; filename=\"monthly_summary_20250309.csv\""
        );
    }
}
