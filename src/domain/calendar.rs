//! Month grid for the calendar view.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use super::period::MonthPeriod;
use super::time_entry::TimeEntryDetails;
use crate::config::DATE_FORMAT;

/// Summary of one entry as shown inside a calendar cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    pub id: Uuid,
    pub hours: f64,
    pub description: String,
    pub client_name: Option<String>,
    pub project_name: Option<String>,
}

impl From<&TimeEntryDetails> for DayEntry {
    fn from(details: &TimeEntryDetails) -> Self {
        Self {
            id: details.entry.id,
            hours: details.entry.hours,
            description: details.entry.description.clone(),
            client_name: details.client_name.clone(),
            project_name: details.project_name.clone(),
        }
    }
}

/// Monday-first weeks of a month plus the entries of each day.
///
/// `weeks` holds day numbers with `0` for cells outside the month.
/// `entries_by_date` is keyed by `YYYY-MM-DD` and only has keys for days
/// that have at least one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub period: MonthPeriod,
    pub weeks: Vec<[u32; 7]>,
    pub entries_by_date: BTreeMap<String, Vec<DayEntry>>,
}

impl MonthGrid {
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.entries_by_date
            .get(&date_key(date))
            .map(|entries| entries.iter().map(|e| e.hours).sum())
            .unwrap_or(0.0)
    }

    pub fn total_hours(&self) -> f64 {
        self.entries_by_date
            .values()
            .flatten()
            .map(|e| e.hours)
            .sum()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Day numbers laid out in Monday-first weeks.
pub fn month_weeks(period: MonthPeriod) -> Vec<[u32; 7]> {
    let offset = period.first_day().weekday().num_days_from_monday() as usize;
    let mut weeks = Vec::with_capacity(6);
    let mut week = [0u32; 7];
    let mut slot = offset;

    for day in 1..=period.days_in_month() {
        week[slot] = day;
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [0u32; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }

    weeks
}

/// Lay out `entries` on the grid of `period`. Entries dated outside the
/// month are ignored.
pub fn build_month_grid(period: MonthPeriod, entries: &[TimeEntryDetails]) -> MonthGrid {
    let mut entries_by_date: BTreeMap<String, Vec<DayEntry>> = BTreeMap::new();

    for details in entries.iter().filter(|d| period.contains(d.entry.date)) {
        entries_by_date
            .entry(date_key(details.entry.date))
            .or_default()
            .push(DayEntry::from(details));
    }

    MonthGrid {
        period,
        weeks: month_weeks(period),
        entries_by_date,
    }
}
