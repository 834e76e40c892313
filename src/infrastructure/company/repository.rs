//! Storage-backed company repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::company::{Company, CompanyId, CompanyRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of CompanyRepository
///
/// Identifiers are assigned as one more than the highest stored identifier.
#[derive(Debug)]
pub struct StorageCompanyRepository {
    storage: Arc<dyn Storage<Company>>,
    id_lock: Mutex<()>,
}

impl StorageCompanyRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<Company>>) -> Self {
        Self {
            storage,
            id_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl CompanyRepository for StorageCompanyRepository {
    async fn get(&self, id: CompanyId) -> Result<Option<Company>, DomainError> {
        self.storage.get(&id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|c| c.name() == name)
            .min_by_key(|c| c.id()))
    }

    async fn create(&self, name: &str) -> Result<Company, DomainError> {
        let _guard = self.id_lock.lock().await;

        let next_id = self
            .storage
            .list()
            .await?
            .iter()
            .map(|c| c.id().value())
            .max()
            .unwrap_or(0)
            + 1;

        let company = Company::new(CompanyId::new(next_id), name)?;
        self.storage.create(company).await
    }

    async fn list(&self) -> Result<Vec<Company>, DomainError> {
        let mut companies = self.storage.list().await?;
        companies.sort_by_key(|c| c.id());
        Ok(companies)
    }
}
