//! Company entity

use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Company identifier, assigned by the store in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(i32);

impl CompanyId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for CompanyId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// Company entity. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    name: String,
    #[serde(default)]
    version: u64,
}

impl Company {
    pub fn new(id: CompanyId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("Company name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            version: 0,
        })
    }

    pub fn id(&self) -> CompanyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl StorageEntity for Company {
    type Key = CompanyId;

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
