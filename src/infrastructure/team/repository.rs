//! Storage-backed team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::project::ProjectId;
use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

fn sort_by_name(teams: &mut [Team]) {
    teams.sort_by(|a, b| a.name().cmp(b.name()));
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(&id).await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.create(team).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        if !self.storage.exists(&team.id()).await? {
            return Err(DomainError::not_found("Team not found"));
        }

        self.storage.update(team).await
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        self.storage.delete(&id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams = self.storage.list().await?;
        sort_by_name(&mut teams);
        Ok(teams)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    async fn find_by_manager(&self, manager_id: UserId) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|t| t.is_managed_by(manager_id))
            .collect();
        sort_by_name(&mut teams);
        Ok(teams)
    }

    async fn find_by_project(&self, project_id: ProjectId) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|t| t.project_id() == project_id)
            .collect();
        sort_by_name(&mut teams);
        Ok(teams)
    }
}
