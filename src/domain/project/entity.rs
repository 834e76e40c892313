//! Project entity and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_date_range, validate_project_name, ProjectValidationError};
use crate::domain::company::CompanyId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
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

impl std::str::FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ProjectId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    /// Owning company
    company_id: CompanyId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: u64,
}

impl Project {
    /// Name of the sentinel project teams fall back to
    pub const DEFAULT_NAME: &'static str = "Default";

    /// Create a new project with a generated identifier
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        company_id: CompanyId,
    ) -> Result<Self, ProjectValidationError> {
        let name = name.into();
        validate_project_name(&name)?;
        validate_date_range(start_date, end_date)?;
        let now = Utc::now();

        Ok(Self {
            id: ProjectId::generate(),
            name,
            start_date,
            end_date,
            company_id,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // Getters

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if this is the sentinel default project
    pub fn is_default(&self) -> bool {
        self.name == Self::DEFAULT_NAME
    }

    /// Check if the project runs on the given day, bounds inclusive
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    // Mutators

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ProjectValidationError> {
        let name = name.into();
        validate_project_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn reschedule(
        &mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(), ProjectValidationError> {
        validate_date_range(start_date, end_date)?;
        self.start_date = start_date;
        self.end_date = end_date;
        self.touch();
        Ok(())
    }

    pub fn move_to_company(&mut self, company_id: CompanyId) {
        self.company_id = company_id;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Project {
    type Key = ProjectId;

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

/// Partial update for a project; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub company_id: Option<CompanyId>,
}

impl ProjectPatch {
    /// The new name, if one is present and not blank
    pub fn effective_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
