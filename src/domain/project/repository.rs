//! Project repository trait

use async_trait::async_trait;
use chrono::NaiveDate;

use super::entity::{Project, ProjectId};
use crate::domain::DomainError;

/// Repository for managing projects
#[async_trait]
pub trait ProjectRepository: Send + Sync + std::fmt::Debug {
    /// Get a project by ID
    async fn get(&self, id: ProjectId) -> Result<Option<Project>, DomainError>;

    /// Find a project by its exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Project>, DomainError>;

    /// Create a new project
    async fn create(&self, project: Project) -> Result<Project, DomainError>;

    /// Update an existing project, rejecting stale versions
    async fn update(&self, project: Project) -> Result<Project, DomainError>;

    /// Delete a project by ID
    async fn delete(&self, id: ProjectId) -> Result<bool, DomainError>;

    /// List all projects ordered by start date
    async fn list(&self) -> Result<Vec<Project>, DomainError>;

    /// Count projects running on the given day
    async fn count_active(&self, as_of: NaiveDate) -> Result<usize, DomainError>;
}
