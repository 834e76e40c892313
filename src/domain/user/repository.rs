//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user, rejecting stale versions
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Users whose team reference points at the given team
    async fn find_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError>;

    /// List all users ordered by username
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
