//! Domain layer - Core business rules and entities

pub mod audit;
pub mod company;
pub mod error;
pub mod outcome;
pub mod project;
pub mod storage;
pub mod team;
pub mod user;

pub use audit::{AuditAction, AuditEntry, AuditSink, EntityKind};
pub use company::{Company, CompanyId, CompanyRepository};
pub use error::DomainError;
pub use outcome::{Outcome, OutcomeStatus};
pub use project::{Project, ProjectId, ProjectPatch, ProjectRepository, ProjectValidationError};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Team, TeamId, TeamPatch, TeamRepository, TeamValidationError};
pub use user::{Role, User, UserId, UserRepository, UserValidationError};

impl From<ProjectValidationError> for DomainError {
    fn from(error: ProjectValidationError) -> Self {
        Self::validation(error.to_string())
    }
}

impl From<TeamValidationError> for DomainError {
    fn from(error: TeamValidationError) -> Self {
        Self::validation(error.to_string())
    }
}

impl From<UserValidationError> for DomainError {
    fn from(error: UserValidationError) -> Self {
        Self::validation(error.to_string())
    }
}
