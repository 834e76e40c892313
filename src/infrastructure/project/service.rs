//! Project rules: lifecycle of projects and their date ranges

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::company::{CompanyId, CompanyRepository};
use crate::domain::project::{
    merge_date_range, validate_date_range, validate_project_name, Project, ProjectId,
    ProjectPatch, ProjectRepository, ProjectValidationError,
};
use crate::domain::team::TeamRepository;
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::company::CompanyService;

/// Request for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Falls back to the default company when absent
    pub company_id: Option<CompanyId>,
}

/// Project service enforcing project invariants
#[derive(Debug)]
pub struct ProjectService<P: ProjectRepository, C: CompanyRepository, T: TeamRepository> {
    repository: Arc<P>,
    companies: Arc<CompanyService<C>>,
    teams: Arc<T>,
}

impl<P, C, T> ProjectService<P, C, T>
where
    P: ProjectRepository,
    C: CompanyRepository,
    T: TeamRepository,
{
    /// Create a new project service
    pub fn new(repository: Arc<P>, companies: Arc<CompanyService<C>>, teams: Arc<T>) -> Self {
        Self {
            repository,
            companies,
            teams,
        }
    }

    /// Create a new project
    pub async fn create(&self, request: CreateProjectRequest) -> Result<Project, DomainError> {
        info!(name = %request.name, "Creating project");

        validate_date_range(request.start_date, request.end_date)?;
        validate_project_name(&request.name)?;

        let company_id = match request.company_id {
            Some(id) => self
                .companies
                .get(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Company not found"))?
                .id(),
            None => self
                .companies
                .default_company()
                .await?
                .ok_or_else(|| {
                    DomainError::internal(
                        "No company provided and could not find default company",
                    )
                })?
                .id(),
        };

        let project = Project::new(
            request.name,
            request.start_date,
            request.end_date,
            company_id,
        )?;

        let created = self.repository.create(project).await?;
        debug!(id = %created.id(), company_id = %company_id, "Project created");
        Ok(created)
    }

    /// Get a project by ID
    pub async fn get(&self, id: ProjectId) -> Result<Project, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project not found"))
    }

    /// List all projects ordered by start date
    pub async fn list(&self) -> Result<Vec<Project>, DomainError> {
        self.repository.list().await
    }

    /// Apply a partial update.
    ///
    /// Every check runs against the stored project before any field is
    /// changed, so a rejected patch leaves the project untouched.
    pub async fn update(&self, id: ProjectId, patch: ProjectPatch) -> Result<Project, DomainError> {
        info!(id = %id, "Updating project");

        let mut project = self.get(id).await?;

        if project.is_default() {
            return Err(ProjectValidationError::DefaultImmutable.into());
        }

        let name = patch.effective_name().map(str::to_string);
        if let Some(name) = &name {
            validate_project_name(name)?;
        }

        let (start_date, end_date) = merge_date_range(
            (project.start_date(), project.end_date()),
            patch.start_date,
            patch.end_date,
        )?;

        let company_id = match patch.company_id {
            Some(company_id) => Some(
                self.companies
                    .get(company_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Company not found"))?
                    .id(),
            ),
            None => None,
        };

        if let Some(name) = name {
            project.rename(name)?;
        }
        if (start_date, end_date) != (project.start_date(), project.end_date()) {
            project.reschedule(start_date, end_date)?;
        }
        if let Some(company_id) = company_id {
            project.move_to_company(company_id);
        }

        self.repository.update(project).await
    }

    /// Delete a project
    pub async fn delete(&self, id: ProjectId) -> Result<(), DomainError> {
        info!(id = %id, "Deleting project");

        let project = self.get(id).await?;

        if project.is_default() {
            return Err(ProjectValidationError::DefaultUndeletable.into());
        }

        let teams = self.teams.find_by_project(id).await?;
        if !teams.is_empty() {
            debug!(id = %id, teams = teams.len(), "Project still has teams");
            return Err(ProjectValidationError::HasTeams.into());
        }

        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found("Project not found"));
        }

        Ok(())
    }

    /// Count projects running on the given day, bounds inclusive
    pub async fn count_active(&self, as_of: NaiveDate) -> Result<usize, DomainError> {
        debug!(as_of = %as_of, "Counting active projects");
        self.repository.count_active(as_of).await
    }

    /// Project of the first team, by name, led by the given manager
    pub async fn current_project_for_manager(
        &self,
        manager_id: UserId,
    ) -> Result<ProjectId, DomainError> {
        self.teams
            .find_by_manager(manager_id)
            .await?
            .first()
            .map(|team| team.project_id())
            .ok_or_else(|| DomainError::not_found("Team not found for the given manager ID"))
    }
}
