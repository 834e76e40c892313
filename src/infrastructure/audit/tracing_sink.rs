//! Audit sink that writes records to the tracing pipeline

use async_trait::async_trait;
use tracing::info;

use crate::domain::audit::{AuditEntry, AuditSink};
use crate::domain::DomainError;

/// Emits each record as a JSON payload on the `audit` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&entry).map_err(|e| {
            DomainError::internal(format!("Failed to serialize audit entry: {}", e))
        })?;

        info!(
            target: "audit",
            action = %entry.action,
            entity = %entry.entity,
            payload = %payload,
            "{}",
            entry.description
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}
