//! Audit sink that keeps records in memory

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::audit::{AuditEntry, AuditSink};
use crate::domain::DomainError;

/// Collects audit records in memory, newest last
///
/// Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditSink {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded entries
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        self.entries
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?
            .push(entry);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
