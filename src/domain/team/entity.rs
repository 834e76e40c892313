//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_team_name, TeamValidationError};
use crate::domain::project::ProjectId;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::str::FromStr for TeamId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// Team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name
    name: String,
    /// Managing user, always a manager
    manager_id: UserId,
    /// Project the team works on
    project_id: ProjectId,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: u64,
}

impl Team {
    /// Create a new team with a generated identifier
    pub fn new(
        name: impl Into<String>,
        manager_id: UserId,
        project_id: ProjectId,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: TeamId::generate(),
            name,
            manager_id,
            project_id,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manager_id(&self) -> UserId {
        self.manager_id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_managed_by(&self, user_id: UserId) -> bool {
        self.manager_id == user_id
    }

    // Mutators

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_manager(&mut self, manager_id: UserId) {
        self.manager_id = manager_id;
        self.touch();
    }

    pub fn set_project(&mut self, project_id: ProjectId) {
        self.project_id = project_id;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Team {
    type Key = TeamId;

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

/// Partial update for a team; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub manager_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
}

impl TeamPatch {
    /// The new name, if one is present and not blank
    pub fn effective_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}
