//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key rendered as a string, for backends that index by string
    fn storage_key(&self) -> String;
}

/// Trait for types that can be stored
///
/// Every entity carries a version counter. The storage compares the version
/// of an incoming update against the stored one and rejects stale writes.
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;

    /// Version observed when the entity was read (0 for a fresh entity)
    fn version(&self) -> u64;

    /// Overwrites the version; only storage implementations call this
    fn set_version(&mut self, version: u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct TestKey(u32);

    impl StorageKey for TestKey {
        fn storage_key(&self) -> String {
            self.0.to_string()
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct TestEntity {
        id: TestKey,
        version: u64,
    }

    impl StorageEntity for TestEntity {
        type Key = TestKey;

        fn key(&self) -> &Self::Key {
            &self.id
        }

        fn version(&self) -> u64 {
            self.version
        }

        fn set_version(&mut self, version: u64) {
            self.version = version;
        }
    }

    #[test]
    fn test_storage_key_rendering() {
        assert_eq!(TestKey(42).storage_key(), "42");
    }

    #[test]
    fn test_storage_entity_version() {
        let mut entity = TestEntity {
            id: TestKey(1),
            version: 0,
        };
        entity.set_version(3);
        assert_eq!(entity.version(), 3);
        assert_eq!(entity.key().storage_key(), "1");
    }
}
