//! Application state for shared services

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::company::CompanyRepository;
use crate::domain::project::{Project, ProjectId, ProjectPatch, ProjectRepository};
use crate::domain::team::{Team, TeamId, TeamPatch, TeamRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::audit::AuditPublisher;
use crate::infrastructure::project::{CreateProjectRequest, ProjectService};
use crate::infrastructure::team::{CreateTeamRequest, TeamService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub audit: AuditPublisher,
}

#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, DomainError>;
    async fn get(&self, id: ProjectId) -> Result<Project, DomainError>;
    async fn list(&self) -> Result<Vec<Project>, DomainError>;
    async fn update(&self, id: ProjectId, patch: ProjectPatch) -> Result<Project, DomainError>;
    async fn delete(&self, id: ProjectId) -> Result<(), DomainError>;
    async fn count_active(&self, as_of: NaiveDate) -> Result<usize, DomainError>;
    async fn current_project_for_manager(&self, manager_id: UserId)
        -> Result<ProjectId, DomainError>;
}

#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn get(&self, id: TeamId) -> Result<Team, DomainError>;
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
    async fn update(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError>;
    async fn delete(&self, id: TeamId) -> Result<(), DomainError>;
    async fn add_developer(&self, team_id: TeamId, developer_id: UserId)
        -> Result<(), DomainError>;
    async fn remove_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<(), DomainError>;
    async fn list_by_manager(&self, manager_id: UserId) -> Result<Vec<Team>, DomainError>;
    async fn members(&self, id: TeamId) -> Result<Vec<User>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<P, C, T> ProjectServiceTrait for ProjectService<P, C, T>
where
    P: ProjectRepository + 'static,
    C: CompanyRepository + 'static,
    T: TeamRepository + 'static,
{
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, DomainError> {
        ProjectService::create(self, request).await
    }

    async fn get(&self, id: ProjectId) -> Result<Project, DomainError> {
        ProjectService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        ProjectService::list(self).await
    }

    async fn update(&self, id: ProjectId, patch: ProjectPatch) -> Result<Project, DomainError> {
        ProjectService::update(self, id, patch).await
    }

    async fn delete(&self, id: ProjectId) -> Result<(), DomainError> {
        ProjectService::delete(self, id).await
    }

    async fn count_active(&self, as_of: NaiveDate) -> Result<usize, DomainError> {
        ProjectService::count_active(self, as_of).await
    }

    async fn current_project_for_manager(
        &self,
        manager_id: UserId,
    ) -> Result<ProjectId, DomainError> {
        ProjectService::current_project_for_manager(self, manager_id).await
    }
}

#[async_trait::async_trait]
impl<T, P, U> TeamServiceTrait for TeamService<T, P, U>
where
    T: TeamRepository + 'static,
    P: ProjectRepository + 'static,
    U: UserRepository + 'static,
{
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        TeamService::count(self).await
    }

    async fn update(&self, id: TeamId, patch: TeamPatch) -> Result<Team, DomainError> {
        TeamService::update(self, id, patch).await
    }

    async fn delete(&self, id: TeamId) -> Result<(), DomainError> {
        TeamService::delete(self, id).await
    }

    async fn add_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<(), DomainError> {
        TeamService::add_developer(self, team_id, developer_id).await
    }

    async fn remove_developer(
        &self,
        team_id: TeamId,
        developer_id: UserId,
    ) -> Result<(), DomainError> {
        TeamService::remove_developer(self, team_id, developer_id).await
    }

    async fn list_by_manager(&self, manager_id: UserId) -> Result<Vec<Team>, DomainError> {
        TeamService::list_by_manager(self, manager_id).await
    }

    async fn members(&self, id: TeamId) -> Result<Vec<User>, DomainError> {
        TeamService::members(self, id).await
    }
}
