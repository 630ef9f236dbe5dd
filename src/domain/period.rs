//! Calendar month used as the unit of reporting.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::config::{EARLIEST_REPORT_MONTH, EARLIEST_REPORT_YEAR};
use crate::errors::{AppError, AppResult};

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    first: NaiveDate,
}

impl MonthPeriod {
    /// Build a period from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation(format!(
                "Invalid month {}, expected 1-12",
                month
            )));
        }

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| AppError::validation(format!("Invalid year {}", year)))
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    /// First month reachable on the dashboard.
    pub fn earliest() -> Self {
        Self::new(EARLIEST_REPORT_YEAR, EARLIEST_REPORT_MONTH)
            .unwrap_or_else(|_| Self::containing(NaiveDate::MIN))
    }

    /// Clamp into `[earliest, month of today]`.
    ///
    /// A floor later than `today` (clock behind the floor) yields the floor.
    pub fn clamp_to(self, today: NaiveDate) -> Self {
        let current = Self::containing(today);
        let floor = Self::earliest();

        if self > current {
            current.max(floor)
        } else if self < floor {
            floor
        } else {
            self
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Day before the first of the next month; the last representable month
    /// ends on `NaiveDate::MAX`.
    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Sort/export key, `YYYY-MM`.
    pub fn key(&self) -> String {
        self.first.format("%Y-%m").to_string()
    }

    /// Human-readable label, e.g. `March 2025`.
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}
