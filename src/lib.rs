//! Staffing Service
//!
//! Manages companies, projects, teams and users for a staffing application:
//! - Project lifecycle with a protected "Default" project
//! - Teams led by managers, with developers assigned to one team at a time
//! - Audit trail of team operations, decoupled from the operations themselves

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::{AuditSinkKind, SeedConfig};
use domain::{audit::AuditSink, Company, Project, ProjectRepository, Team, User};
use infrastructure::{
    audit::{AuditPublisher, InMemoryAuditSink, TracingAuditSink},
    company::{CompanyService, StorageCompanyRepository},
    project::{CreateProjectRequest, ProjectService, StorageProjectRepository},
    storage::InMemoryStorage,
    team::{StorageTeamRepository, TeamService},
    user::{StorageUserRepository, UserService},
};
use tracing::info;

/// Assembled services, with handles used by seeding and tests
pub struct Application {
    pub state: AppState,
    pub companies: Arc<CompanyService<StorageCompanyRepository>>,
    pub users: Arc<UserService<StorageUserRepository>>,
    /// Present when the audit sink is `memory`
    pub audit_sink: Option<InMemoryAuditSink>,
}

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(build_application(config).await?.state)
}

/// Wire storage, repositories and rule services, then seed startup data
pub async fn build_application(config: &AppConfig) -> anyhow::Result<Application> {
    let company_repository = Arc::new(StorageCompanyRepository::new(Arc::new(
        InMemoryStorage::<Company>::new(),
    )));
    let project_repository = Arc::new(StorageProjectRepository::new(Arc::new(
        InMemoryStorage::<Project>::new(),
    )));
    let team_repository = Arc::new(StorageTeamRepository::new(Arc::new(
        InMemoryStorage::<Team>::new(),
    )));
    let user_repository = Arc::new(StorageUserRepository::new(Arc::new(
        InMemoryStorage::<User>::new(),
    )));

    let (audit, audit_sink) = create_audit_publisher(config);
    info!(
        sink = ?config.audit.sink,
        capacity = config.audit.channel_capacity,
        "Audit publisher ready"
    );

    let companies = Arc::new(CompanyService::new(
        company_repository,
        config.seed.default_company.clone(),
    ));
    let users = Arc::new(UserService::new(user_repository));

    let project_service = Arc::new(ProjectService::new(
        project_repository.clone(),
        companies.clone(),
        team_repository.clone(),
    ));
    let team_service = Arc::new(TeamService::new(
        team_repository,
        project_repository.clone(),
        users.clone(),
        audit.clone(),
    ));

    seed(
        &config.seed,
        &companies,
        &users,
        project_service.as_ref(),
        project_repository.as_ref(),
    )
    .await?;

    Ok(Application {
        state: AppState {
            project_service,
            team_service,
            audit,
        },
        companies,
        users,
        audit_sink,
    })
}

fn create_audit_publisher(config: &AppConfig) -> (AuditPublisher, Option<InMemoryAuditSink>) {
    let service_name = config.audit.service_name.clone();
    let capacity = config.audit.channel_capacity;

    match config.audit.sink {
        AuditSinkKind::Tracing => {
            let sink: Arc<dyn AuditSink> = Arc::new(TracingAuditSink::new());
            (AuditPublisher::spawn(sink, capacity, service_name), None)
        }
        AuditSinkKind::Memory => {
            let sink = InMemoryAuditSink::new();
            let publisher = AuditPublisher::spawn(Arc::new(sink.clone()), capacity, service_name);
            (publisher, Some(sink))
        }
        AuditSinkKind::Disabled => (AuditPublisher::disabled(service_name), None),
    }
}

/// Create the default company, the Default project and configured users
async fn seed<P, T>(
    seed: &SeedConfig,
    companies: &CompanyService<StorageCompanyRepository>,
    users: &UserService<StorageUserRepository>,
    projects: &ProjectService<P, StorageCompanyRepository, T>,
    project_repository: &P,
) -> anyhow::Result<()>
where
    P: ProjectRepository,
    T: domain::TeamRepository,
{
    companies.ensure(&seed.default_company).await?;
    for name in &seed.companies {
        companies.ensure(name).await?;
    }

    if seed.default_project
        && project_repository
            .find_by_name(Project::DEFAULT_NAME)
            .await?
            .is_none()
    {
        let project = projects
            .create(CreateProjectRequest {
                name: Project::DEFAULT_NAME.to_string(),
                start_date: seed.default_project_start,
                end_date: seed.default_project_end,
                company_id: None,
            })
            .await?;
        info!(id = %project.id(), "Default project created");
    }

    for user in &seed.users {
        users.ensure(&user.username, user.role).await?;
    }

    info!(
        companies = seed.companies.len() + 1,
        users = seed.users.len(),
        "Startup data seeded"
    );
    Ok(())
}
