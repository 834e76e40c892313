//! Company lookups used by project rules and startup seeding

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::company::{Company, CompanyId, CompanyRepository};
use crate::domain::DomainError;

/// Company service
#[derive(Debug)]
pub struct CompanyService<R: CompanyRepository> {
    repository: Arc<R>,
    default_company_name: String,
}

impl<R: CompanyRepository> CompanyService<R> {
    /// Create a new company service
    pub fn new(repository: Arc<R>, default_company_name: impl Into<String>) -> Self {
        Self {
            repository,
            default_company_name: default_company_name.into(),
        }
    }

    pub fn default_company_name(&self) -> &str {
        &self.default_company_name
    }

    /// Get a company by ID
    pub async fn get(&self, id: CompanyId) -> Result<Option<Company>, DomainError> {
        self.repository.get(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Company>, DomainError> {
        self.repository.find_by_name(name).await
    }

    /// The company projects fall back to when none is given
    pub async fn default_company(&self) -> Result<Option<Company>, DomainError> {
        self.repository.find_by_name(&self.default_company_name).await
    }

    /// Create a company
    pub async fn create(&self, name: &str) -> Result<Company, DomainError> {
        info!(name = %name, "Creating company");
        self.repository.create(name).await
    }

    /// Return the company with this name, creating it when missing
    pub async fn ensure(&self, name: &str) -> Result<Company, DomainError> {
        if let Some(company) = self.repository.find_by_name(name).await? {
            debug!(name = %name, "Company already exists");
            return Ok(company);
        }

        self.create(name).await
    }

    pub async fn list(&self) -> Result<Vec<Company>, DomainError> {
        self.repository.list().await
    }
}
