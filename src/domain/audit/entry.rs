//! Audit record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CreateSuccess,
    CreateFailed,
    UpdateSuccess,
    UpdateFailed,
    DeleteFailed,
    AddDeveloperSuccess,
    AddDeveloperFailed,
    RemoveDeveloperSuccess,
    RemoveDeveloperFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSuccess => "CREATE_SUCCESS",
            Self::CreateFailed => "CREATE_FAILED",
            Self::UpdateSuccess => "UPDATE_SUCCESS",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::DeleteFailed => "DELETE_FAILED",
            Self::AddDeveloperSuccess => "ADD_DEVELOPER_SUCCESS",
            Self::AddDeveloperFailed => "ADD_DEVELOPER_FAILED",
            Self::RemoveDeveloperSuccess => "REMOVE_DEVELOPER_SUCCESS",
            Self::RemoveDeveloperFailed => "REMOVE_DEVELOPER_FAILED",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an audit record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Team,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Team => write!(f, "Team"),
        }
    }
}

/// A single audit record as handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    /// Name of the emitting service
    pub service: String,
    pub action: AuditAction,
    pub entity: EntityKind,
    pub description: String,
}

impl AuditEntry {
    pub fn new(
        service: impl Into<String>,
        action: AuditAction,
        entity: EntityKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            service: service.into(),
            action,
            entity,
            description: description.into(),
        }
    }
}
