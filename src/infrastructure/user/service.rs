//! User lookups consumed by team rules and startup seeding

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::storage::StorageEntity;
use crate::domain::team::TeamId;
use crate::domain::user::{Role, User, UserId, UserRepository};
use crate::domain::DomainError;

/// User service
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Persist changes to an existing user
    ///
    /// Fails with `DomainError::Conflict` when the user was modified since it
    /// was read.
    pub async fn save(&self, user: User) -> Result<User, DomainError> {
        debug!(id = %user.id(), version = user.version(), "Saving user");
        self.repository.update(user).await
    }

    /// Users that are members of the given team
    pub async fn find_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError> {
        self.repository.find_by_team(team_id).await
    }

    /// Create a new user
    pub async fn create(&self, username: &str, role: Role) -> Result<User, DomainError> {
        info!(username = %username, role = %role, "Creating user");
        let user = User::new(username, role)?;
        self.repository.create(user).await
    }

    /// Return the user with this username, creating it when missing
    pub async fn ensure(&self, username: &str, role: Role) -> Result<User, DomainError> {
        if let Some(user) = self.repository.get_by_username(username).await? {
            debug!(username = %username, "User already exists");
            return Ok(user);
        }

        self.create(username, role).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }
}
