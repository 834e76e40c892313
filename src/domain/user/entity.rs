//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_username, UserValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// User identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
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

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// Role of a user across the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Developer,
}

impl Role {
    /// Managers are the only users that can lead a team
    pub fn can_manage_teams(&self) -> bool {
        match self {
            Self::Manager => true,
            Self::Admin | Self::Developer => false,
        }
    }

    /// Developers are the only users that can be team members
    pub fn can_join_team(&self) -> bool {
        match self {
            Self::Developer => true,
            Self::Admin | Self::Manager => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Developer => write!(f, "developer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "developer" => Ok(Self::Developer),
            other => Err(UserValidationError::UnknownRole(other.to_string())),
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Login name
    username: String,
    /// Organizational role
    role: Role,
    /// Team the user is a member of, developers only
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: u64,
}

impl User {
    /// Create a new user with a generated identifier
    pub fn new(username: impl Into<String>, role: Role) -> Result<Self, UserValidationError> {
        Self::with_id(UserId::generate(), username, role)
    }

    /// Create a new user with a known identifier
    pub fn with_id(
        id: UserId,
        username: impl Into<String>,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        validate_username(&username)?;
        let now = Utc::now();

        Ok(Self {
            id,
            username,
            role,
            team_id: None,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the user is a member of the given team
    pub fn is_member_of(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }

    // Mutators

    /// Assign the user to a team
    pub fn join_team(&mut self, team_id: TeamId) {
        self.team_id = Some(team_id);
        self.touch();
    }

    /// Clear the team assignment
    pub fn leave_team(&mut self) {
        self.team_id = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for User {
    type Key = UserId;

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
