//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic storage trait for CRUD operations on any entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns `Conflict` if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity.
    ///
    /// Returns `NotFound` if the key is unknown and `Conflict` if the stored
    /// version differs from `entity.version()`. On success the returned
    /// entity carries the incremented version.
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its key, returns true if deleted
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
