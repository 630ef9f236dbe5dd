//! Report service - monthly totals, history, calendar and dashboard data.
//!
//! Reads the rows of one user and hands them to the pure aggregation and
//! calendar functions in the domain layer. "Today" is always supplied by
//! the caller.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::try_join;
use uuid::Uuid;

use crate::config::{MAX_CALENDAR_YEAR, MIN_CALENDAR_YEAR};
use crate::domain::report::{client_totals, distinct_years, monthly_summary};
use crate::domain::{
    build_month_grid, Client, ClientTotal, EntryFilter, HistoryFilter, MonthGrid, MonthPeriod,
    MonthlySummary, Project, TimeEntryDetails,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub period: MonthPeriod,
    pub client_totals: Vec<ClientTotal>,
    pub hours_today: f64,
    pub hours_this_month: f64,
    pub grid: MonthGrid,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
}

/// Calendar payload for an arbitrary month.
#[derive(Debug, Clone)]
pub struct CalendarData {
    pub grid: MonthGrid,
    /// Zero unless `today` lies in the requested month
    pub hours_today: f64,
    pub hours_this_month: f64,
}

/// Reports page: raw entries, grouped history and filter choices.
#[derive(Debug, Clone)]
pub struct ReportOverview {
    pub entries: Vec<TimeEntryDetails>,
    pub summary: Vec<MonthlySummary>,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub years: Vec<i32>,
}

#[async_trait]
pub trait ReportService: Send + Sync {
    /// Hours per client for a month clamped to `[2025-01, month of today]`,
    /// largest total first
    async fn monthly_client_totals(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> AppResult<Vec<ClientTotal>>;

    /// Hours grouped by (month, client, project), newest month first
    async fn monthly_summary(
        &self,
        user_id: Uuid,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<MonthlySummary>>;

    /// Hours on one exact date
    async fn hours_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<f64>;

    /// Hours in the month containing `reference`
    async fn hours_in_month(&self, user_id: Uuid, reference: NaiveDate) -> AppResult<f64>;

    async fn month_calendar(&self, user_id: Uuid, period: MonthPeriod) -> AppResult<MonthGrid>;

    /// Calendar for a validated, unclamped month
    async fn calendar_data(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> AppResult<CalendarData>;

    /// Dashboard for the requested month (default: month of `today`), clamped
    async fn dashboard(
        &self,
        user_id: Uuid,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> AppResult<Dashboard>;

    /// Years having entries, most recent first
    async fn available_years(&self, user_id: Uuid) -> AppResult<Vec<i32>>;

    async fn report_overview(&self, user_id: Uuid, filter: &HistoryFilter)
        -> AppResult<ReportOverview>;
}

pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn month_entries(
        &self,
        user_id: Uuid,
        period: MonthPeriod,
    ) -> AppResult<Vec<TimeEntryDetails>> {
        let filter = EntryFilter {
            date_from: Some(period.first_day()),
            date_to: Some(period.last_day()),
            client_id: None,
        };
        self.uow.time_entries().list_details(user_id, &filter).await
    }

    async fn history_entries(
        &self,
        user_id: Uuid,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<TimeEntryDetails>> {
        let range = filter.date_range();
        let query = EntryFilter {
            date_from: range.map(|(from, _)| from),
            date_to: range.map(|(_, to)| to),
            client_id: None,
        };
        self.uow.time_entries().list_details(user_id, &query).await
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn monthly_client_totals(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> AppResult<Vec<ClientTotal>> {
        let period = MonthPeriod::new(year, month)?.clamp_to(today);
        let entries = self.month_entries(user_id, period).await?;
        Ok(client_totals(&entries))
    }

    async fn monthly_summary(
        &self,
        user_id: Uuid,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<MonthlySummary>> {
        let entries = self.history_entries(user_id, filter).await?;
        Ok(monthly_summary(&entries, filter))
    }

    async fn hours_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<f64> {
        self.uow
            .time_entries()
            .sum_hours(user_id, Some(date), Some(date))
            .await
    }

    async fn hours_in_month(&self, user_id: Uuid, reference: NaiveDate) -> AppResult<f64> {
        let period = MonthPeriod::containing(reference);
        self.uow
            .time_entries()
            .sum_hours(user_id, Some(period.first_day()), Some(period.last_day()))
            .await
    }

    async fn month_calendar(&self, user_id: Uuid, period: MonthPeriod) -> AppResult<MonthGrid> {
        let entries = self.month_entries(user_id, period).await?;
        Ok(build_month_grid(period, &entries))
    }

    async fn calendar_data(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> AppResult<CalendarData> {
        if !(MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&year) {
            return Err(AppError::validation(format!(
                "Invalid year {}, expected {}-{}",
                year, MIN_CALENDAR_YEAR, MAX_CALENDAR_YEAR
            )));
        }
        let period = MonthPeriod::new(year, month)?;

        let (grid, hours_this_month) = try_join!(
            self.month_calendar(user_id, period),
            self.hours_in_month(user_id, period.first_day()),
        )?;
        let hours_today = if period.contains(today) {
            grid.hours_on(today)
        } else {
            0.0
        };

        Ok(CalendarData {
            grid,
            hours_today,
            hours_this_month,
        })
    }

    async fn dashboard(
        &self,
        user_id: Uuid,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> AppResult<Dashboard> {
        let current = MonthPeriod::containing(today);
        let period = MonthPeriod::new(
            year.unwrap_or_else(|| current.year()),
            month.unwrap_or_else(|| current.month()),
        )?
        .clamp_to(today);

        let clients = self.uow.clients();
        let projects = self.uow.projects();
        let (entries, hours_today, hours_this_month, clients, projects) = try_join!(
            self.month_entries(user_id, period),
            self.hours_on(user_id, today),
            self.hours_in_month(user_id, period.first_day()),
            clients.list(true),
            projects.list(true),
        )?;

        Ok(Dashboard {
            period,
            client_totals: client_totals(&entries),
            hours_today,
            hours_this_month,
            grid: build_month_grid(period, &entries),
            clients,
            projects,
        })
    }

    async fn available_years(&self, user_id: Uuid) -> AppResult<Vec<i32>> {
        let dates = self.uow.time_entries().entry_dates(user_id).await?;
        Ok(distinct_years(dates))
    }

    async fn report_overview(
        &self,
        user_id: Uuid,
        filter: &HistoryFilter,
    ) -> AppResult<ReportOverview> {
        let time_entries = self.uow.time_entries();
        let clients = self.uow.clients();
        let projects = self.uow.projects();
        let all = EntryFilter::default();
        let (entries, summary, clients, projects, years) = try_join!(
            time_entries.list_details(user_id, &all),
            self.monthly_summary(user_id, filter),
            clients.list(true),
            projects.list(true),
            self.available_years(user_id),
        )?;

        Ok(ReportOverview {
            entries,
            summary,
            clients,
            projects,
            years,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockClientRepository, MockProjectRepository, MockTimeEntryRepository};
    use crate::services::test_support::{
        date, details, sample_client, sample_project, TestUnitOfWork,
    };

    fn service(entries: MockTimeEntryRepository) -> ReportManager<TestUnitOfWork> {
        ReportManager::new(Arc::new(TestUnitOfWork::new().with_time_entries(entries)))
    }

    #[tokio::test]
    async fn test_client_totals_empty_month() {
        let mut entries = MockTimeEntryRepository::new();
        entries.expect_list_details().returning(|_, _| Ok(vec![]));

        let totals = service(entries)
            .monthly_client_totals(Uuid::new_v4(), 2025, 3, date(2025, 6, 1))
            .await
            .unwrap();

        assert!(totals.is_empty());
    }

    #[tokio::test]
    async fn test_client_totals_clamp_future_month_to_current() {
        let mut entries = MockTimeEntryRepository::new();
        entries
            .expect_list_details()
            .withf(|_, f| {
                f.date_from == Some(date(2025, 6, 1)) && f.date_to == Some(date(2025, 6, 30))
            })
            .returning(|_, _| Ok(vec![]));

        let result = service(entries)
            .monthly_client_totals(Uuid::new_v4(), 2026, 1, date(2025, 6, 15))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_client_totals_clamp_early_month_to_floor() {
        let mut entries = MockTimeEntryRepository::new();
        entries
            .expect_list_details()
            .withf(|_, f| {
                f.date_from == Some(date(2025, 1, 1)) && f.date_to == Some(date(2025, 1, 31))
            })
            .returning(|_, _| Ok(vec![]));

        let result = service(entries)
            .monthly_client_totals(Uuid::new_v4(), 2024, 7, date(2025, 6, 15))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_calendar_data_rejects_out_of_range_input() {
        let svc = service(MockTimeEntryRepository::new());
        let today = date(2025, 3, 10);

        for (year, month) in [(2025, 13), (2025, 0), (1899, 5), (2101, 5)] {
            let result = svc.calendar_data(Uuid::new_v4(), year, month, today).await;
            assert!(matches!(result, Err(AppError::Validation(_))), "{year}-{month}");
        }
    }

    #[tokio::test]
    async fn test_calendar_data_counts_today_only_inside_month() {
        let acme = sample_client("Acme");
        let rows = vec![details(&acme, None, date(2025, 3, 10), 3.5)];

        let mut entries = MockTimeEntryRepository::new();
        entries
            .expect_list_details()
            .returning(move |_, _| Ok(rows.clone()));
        entries.expect_sum_hours().returning(|_, _, _| Ok(3.5));
        let svc = service(entries);

        let inside = svc
            .calendar_data(Uuid::new_v4(), 2025, 3, date(2025, 3, 10))
            .await
            .unwrap();
        assert_eq!(inside.hours_today, 3.5);
        assert_eq!(inside.hours_this_month, 3.5);
        assert_eq!(inside.grid.period.days_in_month(), 31);

        let outside = svc
            .calendar_data(Uuid::new_v4(), 2025, 3, date(2025, 4, 2))
            .await
            .unwrap();
        assert_eq!(outside.hours_today, 0.0);
    }

    #[tokio::test]
    async fn test_history_year_filter_is_pushed_into_query() {
        let mut entries = MockTimeEntryRepository::new();
        entries
            .expect_list_details()
            .withf(|_, f| {
                f.date_from == Some(date(2025, 1, 1)) && f.date_to == Some(date(2025, 12, 31))
            })
            .returning(|_, _| Ok(vec![]));

        let filter = HistoryFilter::new(Some(2025), None, None);
        let summary = service(entries)
            .monthly_summary(Uuid::new_v4(), &filter)
            .await
            .unwrap();

        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_scenario() {
        let acme = sample_client("Acme");
        let website = sample_project("Website", acme.id);
        let day = date(2025, 3, 10);
        let rows = vec![
            details(&acme, Some(&website), day, 2.0),
            details(&acme, None, day, 3.5),
        ];

        let mut entries = MockTimeEntryRepository::new();
        entries
            .expect_list_details()
            .returning(move |_, _| Ok(rows.clone()));
        entries.expect_sum_hours().returning(|_, _, _| Ok(5.5));

        let catalog_client = acme.clone();
        let mut clients = MockClientRepository::new();
        clients
            .expect_list()
            .returning(move |_| Ok(vec![catalog_client.clone()]));
        let mut projects = MockProjectRepository::new();
        projects
            .expect_list()
            .returning(move |_| Ok(vec![website.clone()]));

        let uow = TestUnitOfWork::new()
            .with_time_entries(entries)
            .with_clients(clients)
            .with_projects(projects);
        let dashboard = ReportManager::new(Arc::new(uow))
            .dashboard(Uuid::new_v4(), Some(2025), Some(3), date(2025, 3, 20))
            .await
            .unwrap();

        assert_eq!(dashboard.period.label(), "March 2025");
        assert_eq!(dashboard.client_totals.len(), 1);
        assert_eq!(dashboard.client_totals[0].total_hours, 5.5);
        assert_eq!(dashboard.grid.entries_by_date["2025-03-10"].len(), 2);
        assert_eq!(dashboard.grid.total_hours(), dashboard.hours_this_month);
    }

    #[tokio::test]
    async fn test_available_years_descending() {
        let mut entries = MockTimeEntryRepository::new();
        entries.expect_entry_dates().returning(|_| {
            Ok(vec![date(2025, 1, 3), date(2026, 2, 1), date(2025, 5, 5)])
        });

        let years = service(entries).available_years(Uuid::new_v4()).await.unwrap();
        assert_eq!(years, vec![2026, 2025]);
    }
}
