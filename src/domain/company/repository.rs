//! Company repository trait

use async_trait::async_trait;

use super::entity::{Company, CompanyId};
use crate::domain::DomainError;

/// Repository for company lookups
#[async_trait]
pub trait CompanyRepository: Send + Sync + std::fmt::Debug {
    /// Get a company by ID
    async fn get(&self, id: CompanyId) -> Result<Option<Company>, DomainError>;

    /// Find a company by its exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, DomainError>;

    /// Create a company; the repository assigns the next identifier
    async fn create(&self, name: &str) -> Result<Company, DomainError>;

    /// List all companies ordered by ID
    async fn list(&self) -> Result<Vec<Company>, DomainError>;
}
