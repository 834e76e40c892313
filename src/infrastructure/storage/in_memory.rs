//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Updates are optimistic: an update whose version does not match the stored
/// version is rejected with `DomainError::Conflict`. Data is lost when the
/// process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, E>>, DomainError> {
        self.entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, E>>, DomainError> {
        self.entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        Ok(self.read()?.get(&key.storage_key()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn create(&self, mut entity: E) -> Result<E, DomainError> {
        let key = entity.key().storage_key();
        let mut entities = self.write()?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entity.set_version(1);
        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: E) -> Result<E, DomainError> {
        let key = entity.key().storage_key();
        let mut entities = self.write()?;

        let stored_version = entities
            .get(&key)
            .map(|stored| stored.version())
            .ok_or_else(|| {
                DomainError::not_found(format!("Entity with key '{}' not found", key))
            })?;

        if stored_version != entity.version() {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' was modified concurrently (expected version {}, found {})",
                key,
                entity.version(),
                stored_version
            )));
        }

        entity.set_version(stored_version + 1);
        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.write()?.remove(&key.storage_key()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.contains_key(&key.storage_key()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }
}
