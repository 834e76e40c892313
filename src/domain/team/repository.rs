//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::project::ProjectId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team, rejecting stale versions
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;

    /// List all teams ordered by name
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Count all teams
    async fn count(&self) -> Result<usize, DomainError>;

    /// Teams led by the given manager, ordered by name
    async fn find_by_manager(&self, manager_id: UserId) -> Result<Vec<Team>, DomainError>;

    /// Teams working on the given project, ordered by name
    async fn find_by_project(&self, project_id: ProjectId) -> Result<Vec<Team>, DomainError>;
}
