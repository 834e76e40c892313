//! Audit sink trait

use async_trait::async_trait;

use super::entry::AuditEntry;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Destination for audit records.
///
/// Sinks may fail; callers never propagate those failures to the operation
/// that produced the record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist or forward one audit record
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
