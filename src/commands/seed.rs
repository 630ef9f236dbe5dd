//! Seed command - Administrator account and demo catalog.

use crate::cli::args::SeedArgs;
use crate::config::{Config, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME, DEFAULT_ADMIN_PASSWORD};
use crate::domain::{NewClient, NewProject, Password};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

/// What a seed run created
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub clients_created: usize,
    pub projects_created: usize,
}

/// Demo catalog: client name, description, then (project, description, hourly rate)
const DEMO_CATALOG: &[(&str, &str, &[(&str, &str, f64)])] = &[
    (
        "Acme",
        "Manufacturing customer",
        &[
            ("Website", "Corporate website redesign", 950.0),
            ("Intranet", "Internal portal maintenance", 850.0),
        ],
    ),
    (
        "Globex",
        "Logistics customer",
        &[("Route planner", "Fleet routing application", 1100.0)],
    ),
    (
        "Initech",
        "Software consultancy",
        &[
            ("Support", "Ongoing support agreement", 750.0),
            ("Migration", "Database migration project", 1000.0),
        ],
    ),
];

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Persistence::new(db.get_connection());

    let report = seed(&uow, args.demo).await?;
    tracing::info!(
        admin_created = report.admin_created,
        clients = report.clients_created,
        projects = report.projects_created,
        "Seed completed"
    );

    Ok(())
}

/// Create the default administrator when missing and, with `demo`, the
/// sample catalog when no clients exist yet. Safe to run repeatedly.
pub async fn seed<U: UnitOfWork>(uow: &U, demo: bool) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    let users = uow.users();
    if users.find_by_email(DEFAULT_ADMIN_EMAIL).await?.is_none() {
        let password = Password::new(DEFAULT_ADMIN_PASSWORD)?;
        users
            .create(
                DEFAULT_ADMIN_NAME.to_string(),
                DEFAULT_ADMIN_EMAIL.to_string(),
                password.into_string(),
                true,
            )
            .await?;
        tracing::warn!(
            email = DEFAULT_ADMIN_EMAIL,
            "Administrator created with the default password, change it after first login"
        );
        report.admin_created = true;
    }

    if !demo {
        return Ok(report);
    }

    let clients = uow.clients();
    if clients.count().await? > 0 {
        tracing::info!("Catalog already populated, skipping demo data");
        return Ok(report);
    }

    let projects = uow.projects();
    for (name, description, client_projects) in DEMO_CATALOG {
        let client = clients
            .create(NewClient {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;
        report.clients_created += 1;

        for (project, project_description, rate) in client_projects.iter() {
            projects
                .create(NewProject {
                    name: project.to_string(),
                    description: Some(project_description.to_string()),
                    client_id: client.id,
                    hourly_rate: Some(*rate),
                })
                .await?;
            report.projects_created += 1;
        }
    }

    Ok(report)
}
