//! Aggregation of time entries into client totals and monthly summaries.
//!
//! Everything here is pure: callers load the rows of one user (the user
//! predicate lives in the query) and hand them over.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::period::MonthPeriod;
use super::time_entry::TimeEntryDetails;
use crate::config::{NO_CLIENT_LABEL, NO_PROJECT_LABEL};

/// Hours logged against one client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientTotal {
    pub client_id: Uuid,
    pub client_name: Option<String>,
    pub total_hours: f64,
}

/// Hours per (month, client, project) group.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub period: MonthPeriod,
    pub client_name: Option<String>,
    pub project_name: Option<String>,
    pub total_hours: f64,
}

impl MonthlySummary {
    pub fn month_label(&self) -> String {
        self.period.label()
    }

    pub fn month_key(&self) -> String {
        self.period.key()
    }
}

/// Optional, independent predicates for the monthly summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub year: Option<i32>,
    /// Case-insensitive substring of the client name
    pub client: Option<String>,
    /// Case-insensitive substring of the project name
    pub project: Option<String>,
}

impl HistoryFilter {
    /// Blank strings count as "no filter".
    pub fn new(year: Option<i32>, client: Option<String>, project: Option<String>) -> Self {
        let clean = |s: Option<String>| {
            s.map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
        };

        Self {
            year,
            client: clean(client),
            project: clean(project),
        }
    }

    /// Inclusive date range implied by the year filter.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let year = self.year?;
        Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ))
    }

    pub fn matches(&self, details: &TimeEntryDetails) -> bool {
        if let Some(year) = self.year {
            if details.entry.date.year() != year {
                return false;
            }
        }

        name_matches(self.client.as_deref(), details.client_name.as_deref())
            && name_matches(self.project.as_deref(), details.project_name.as_deref())
    }
}

fn name_matches(needle: Option<&str>, name: Option<&str>) -> bool {
    match (needle, name) {
        (None, _) => true,
        (Some(needle), Some(name)) => name.to_lowercase().contains(needle),
        (Some(_), None) => false,
    }
}

/// Sum hours per client, largest total first.
///
/// Equal totals are ordered by client name, then by first appearance.
pub fn client_totals(entries: &[TimeEntryDetails]) -> Vec<ClientTotal> {
    let mut totals: Vec<ClientTotal> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for details in entries {
        let client_id = details.entry.client_id;
        match index.get(&client_id) {
            Some(&i) => totals[i].total_hours += details.entry.hours,
            None => {
                index.insert(client_id, totals.len());
                totals.push(ClientTotal {
                    client_id,
                    client_name: details.client_name.clone(),
                    total_hours: details.entry.hours,
                });
            }
        }
    }

    totals.sort_by(|a, b| {
        b.total_hours
            .total_cmp(&a.total_hours)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });
    totals
}

/// Group entries by (month, client name, project name) and sum hours.
///
/// Output is sorted descending on month, then on the displayed client and
/// project labels, so a missing project orders as "No project".
pub fn monthly_summary(entries: &[TimeEntryDetails], filter: &HistoryFilter) -> Vec<MonthlySummary> {
    let mut groups: BTreeMap<(MonthPeriod, Option<String>, Option<String>), f64> = BTreeMap::new();

    for details in entries.iter().filter(|d| filter.matches(d)) {
        let key = (
            MonthPeriod::containing(details.entry.date),
            details.client_name.clone(),
            details.project_name.clone(),
        );
        *groups.entry(key).or_insert(0.0) += details.entry.hours;
    }

    let mut summary: Vec<MonthlySummary> = groups
        .into_iter()
        .map(|((period, client_name, project_name), total_hours)| MonthlySummary {
            period,
            client_name,
            project_name,
            total_hours,
        })
        .collect();

    summary.sort_by(|a, b| summary_sort_key(b).cmp(&summary_sort_key(a)));
    summary
}

fn summary_sort_key(summary: &MonthlySummary) -> (MonthPeriod, &str, &str) {
    (
        summary.period,
        summary.client_name.as_deref().unwrap_or(NO_CLIENT_LABEL),
        summary.project_name.as_deref().unwrap_or(NO_PROJECT_LABEL),
    )
}

pub fn sum_hours(entries: &[TimeEntryDetails]) -> f64 {
    entries.iter().map(|d| d.entry.hours).sum()
}

/// Distinct years, most recent first.
pub fn distinct_years(dates: impl IntoIterator<Item = NaiveDate>) -> Vec<i32> {
    let mut years: Vec<i32> = dates.into_iter().map(|d| d.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeEntry;
    use chrono::Utc;

    fn details(
        client_id: Uuid,
        client: &str,
        project: Option<&str>,
        date: (i32, u32, u32),
        hours: f64,
    ) -> TimeEntryDetails {
        TimeEntryDetails {
            entry: TimeEntry {
                id: Uuid::new_v4(),
                user_id: Uuid::nil(),
                client_id,
                project_id: project.map(|_| Uuid::new_v4()),
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                hours,
                description: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            client_name: Some(client.to_string()),
            project_name: project.map(str::to_string),
        }
    }

    #[test]
    fn test_client_totals_scenario() {
        let acme = Uuid::new_v4();
        let entries = vec![
            details(acme, "Acme", None, (2025, 3, 10), 3.5),
            details(acme, "Acme", Some("Website"), (2025, 3, 10), 2.0),
        ];

        let totals = client_totals(&entries);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].client_name.as_deref(), Some("Acme"));
        assert_eq!(totals[0].total_hours, 5.5);
    }

    #[test]
    fn test_client_totals_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let entries = vec![
            details(a, "Zeta", None, (2025, 3, 1), 2.0),
            details(b, "Beta", None, (2025, 3, 2), 5.0),
            details(c, "Alpha", None, (2025, 3, 3), 2.0),
        ];

        let names: Vec<_> = client_totals(&entries)
            .into_iter()
            .map(|t| t.client_name.unwrap())
            .collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_client_totals_empty() {
        assert!(client_totals(&[]).is_empty());
    }

    #[test]
    fn test_monthly_summary_groups_and_sorts() {
        let acme = Uuid::new_v4();
        let globex = Uuid::new_v4();
        let entries = vec![
            details(acme, "Acme", None, (2025, 3, 10), 3.5),
            details(acme, "Acme", Some("Website"), (2025, 3, 10), 2.0),
            details(acme, "Acme", Some("Website"), (2025, 3, 11), 1.0),
            details(globex, "Globex", Some("Audit"), (2025, 2, 3), 4.0),
            details(acme, "Acme", Some("Website"), (2025, 2, 4), 1.5),
        ];

        let summary = monthly_summary(&entries, &HistoryFilter::default());
        let rows: Vec<_> = summary
            .iter()
            .map(|s| {
                (
                    s.month_key(),
                    s.client_name.clone().unwrap(),
                    s.project_name.clone(),
                    s.total_hours,
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                ("2025-03".to_string(), "Acme".to_string(), Some("Website".to_string()), 3.0),
                ("2025-03".to_string(), "Acme".to_string(), None, 3.5),
                ("2025-02".to_string(), "Globex".to_string(), Some("Audit".to_string()), 4.0),
                ("2025-02".to_string(), "Acme".to_string(), Some("Website".to_string()), 1.5),
            ]
        );
        assert_eq!(summary[0].month_label(), "March 2025");
    }

    #[test]
    fn test_monthly_summary_orders_missing_project_by_label() {
        let acme = Uuid::new_v4();
        let entries = vec![
            details(acme, "Acme", Some("Audit"), (2025, 3, 10), 1.0),
            details(acme, "Acme", None, (2025, 3, 11), 2.0),
            details(acme, "Acme", Some("Website"), (2025, 3, 12), 0.5),
        ];

        let summary = monthly_summary(&entries, &HistoryFilter::default());
        let projects: Vec<_> = summary.iter().map(|s| s.project_name.as_deref()).collect();

        assert_eq!(projects, vec![Some("Website"), None, Some("Audit")]);
        assert_eq!(summary[1].total_hours, 2.0);
    }

    #[test]
    fn test_history_filters_are_independent() {
        let acme = Uuid::new_v4();
        let globex = Uuid::new_v4();
        let entries = vec![
            details(acme, "Acme AB", Some("Website"), (2025, 3, 10), 2.0),
            details(acme, "Acme AB", None, (2024, 12, 10), 1.0),
            details(globex, "Globex", Some("Web shop"), (2025, 1, 10), 4.0),
        ];

        let by_year = monthly_summary(&entries, &HistoryFilter::new(Some(2024), None, None));
        assert_eq!(by_year.len(), 1);
        assert_eq!(by_year[0].total_hours, 1.0);

        let by_client = monthly_summary(&entries, &HistoryFilter::new(None, Some("acme".into()), None));
        assert_eq!(by_client.len(), 2);

        let by_project = monthly_summary(&entries, &HistoryFilter::new(None, None, Some("WEB".into())));
        assert_eq!(by_project.len(), 2);
        assert!(by_project.iter().all(|s| s.project_name.is_some()));

        let combined = monthly_summary(
            &entries,
            &HistoryFilter::new(Some(2025), Some("glob".into()), Some("shop".into())),
        );
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].total_hours, 4.0);
    }

    #[test]
    fn test_blank_filters_ignored() {
        let filter = HistoryFilter::new(None, Some("  ".into()), Some(String::new()));
        assert_eq!(filter, HistoryFilter::default());
    }

    #[test]
    fn test_year_date_range() {
        let filter = HistoryFilter::new(Some(2025), None, None);
        let (from, to) = filter.date_range().unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert!(HistoryFilter::default().date_range().is_none());
    }

    #[test]
    fn test_distinct_years() {
        let dates = [
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 9).unwrap(),
        ];
        assert_eq!(distinct_years(dates), vec![2026, 2025]);
    }
}
