//! Storage-backed project repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::project::{Project, ProjectId, ProjectRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of ProjectRepository
#[derive(Debug)]
pub struct StorageProjectRepository {
    storage: Arc<dyn Storage<Project>>,
}

impl StorageProjectRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Project>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ProjectRepository for StorageProjectRepository {
    async fn get(&self, id: ProjectId) -> Result<Option<Project>, DomainError> {
        self.storage.get(&id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Project>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|p| p.name() == name)
            .min_by_key(|p| p.created_at()))
    }

    async fn create(&self, project: Project) -> Result<Project, DomainError> {
        self.storage.create(project).await
    }

    async fn update(&self, project: Project) -> Result<Project, DomainError> {
        self.storage.update(project).await
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, DomainError> {
        self.storage.delete(&id).await
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        let mut projects = self.storage.list().await?;
        projects.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(projects)
    }

    async fn count_active(&self, as_of: NaiveDate) -> Result<usize, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .iter()
            .filter(|p| p.is_active_on(as_of))
            .count())
    }
}
