//! Storage-backed user repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of UserRepository
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
}

impl StorageUserRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self { storage }
    }
}

fn sort_by_username(users: &mut [User]) {
    users.sort_by(|a, b| a.username().cmp(b.username()));
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.storage.get(&id).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .find(|u| u.username() == username))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.get_by_username(user.username()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        self.storage.create(user).await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        self.storage.update(user).await
    }

    async fn find_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError> {
        let mut members: Vec<User> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|u| u.is_member_of(team_id))
            .collect();
        sort_by_username(&mut members);
        Ok(members)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users = self.storage.list().await?;
        sort_by_username(&mut users);
        Ok(users)
    }
}
