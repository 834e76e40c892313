//! Channel-backed audit publisher
//!
//! Records are queued without waiting and forwarded to the sink by a
//! background task. Queue overflow and sink failures are logged and dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::audit::{AuditAction, AuditEntry, AuditSink, EntityKind};

enum Message {
    Entry(AuditEntry),
    Flush(oneshot::Sender<()>),
}

/// Handle used by rule services to emit audit records
#[derive(Debug, Clone)]
pub struct AuditPublisher {
    service: Arc<str>,
    sender: Option<mpsc::Sender<Message>>,
}

impl AuditPublisher {
    /// Start the forwarding task on the current runtime
    pub fn spawn(sink: Arc<dyn AuditSink>, capacity: usize, service: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        tokio::spawn(forward(sink, receiver));

        Self {
            service: Arc::from(service.into()),
            sender: Some(sender),
        }
    }

    /// A publisher that discards every record
    pub fn disabled(service: impl Into<String>) -> Self {
        Self {
            service: Arc::from(service.into()),
            sender: None,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Queue a record; never blocks and never fails the caller
    pub fn record(&self, action: AuditAction, entity: EntityKind, description: impl Into<String>) {
        let Some(sender) = &self.sender else {
            return;
        };

        let entry = AuditEntry::new(self.service.as_ref(), action, entity, description);
        if let Err(e) = sender.try_send(Message::Entry(entry)) {
            warn!(action = %action, error = %e, "Dropping audit record");
        }
    }

    /// Wait until every record queued before this call reached the sink
    pub async fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };

        let (ack, done) = oneshot::channel();
        if sender.send(Message::Flush(ack)).await.is_err() {
            warn!("Audit forwarder is gone, nothing to flush");
            return;
        }
        let _ = done.await;
    }
}

async fn forward(sink: Arc<dyn AuditSink>, mut receiver: mpsc::Receiver<Message>) {
    debug!(sink = sink.name(), "Audit forwarder started");

    while let Some(message) = receiver.recv().await {
        match message {
            Message::Entry(entry) => {
                let action = entry.action;
                if let Err(e) = sink.record(entry).await {
                    warn!(sink = sink.name(), action = %action, error = %e, "Audit sink failed");
                }
            }
            Message::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    debug!(sink = sink.name(), "Audit forwarder stopped");
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::MockAuditSink;
    use crate::domain::DomainError;
    use crate::infrastructure::audit::InMemoryAuditSink;

    #[tokio::test]
    async fn test_records_reach_sink_in_order() {
        let sink = InMemoryAuditSink::new();
        let publisher = AuditPublisher::spawn(Arc::new(sink.clone()), 16, "staffing-service");

        publisher.record(AuditAction::CreateFailed, EntityKind::Team, "first");
        publisher.record(AuditAction::CreateSuccess, EntityKind::Team, "second");
        publisher.flush().await;

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "first");
        assert_eq!(entries[1].action, AuditAction::CreateSuccess);
        assert_eq!(entries[1].service, "staffing-service");
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let mut sink = MockAuditSink::new();
        sink.expect_name().return_const("mock");
        sink.expect_record()
            .times(2)
            .returning(|_| Err(DomainError::storage("sink down")));

        let publisher = AuditPublisher::spawn(Arc::new(sink), 4, "svc");
        publisher.record(AuditAction::UpdateFailed, EntityKind::Team, "a");
        publisher.record(AuditAction::UpdateSuccess, EntityKind::Team, "b");
        publisher.flush().await;
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let mut sink = MockAuditSink::new();
        sink.expect_name().return_const("mock");
        sink.expect_record().returning(|_| Ok(()));

        let publisher = AuditPublisher::spawn(Arc::new(sink), 1, "svc");
        for _ in 0..100 {
            publisher.record(AuditAction::CreateSuccess, EntityKind::Team, "burst");
        }
        publisher.flush().await;
    }

    #[tokio::test]
    async fn test_disabled_publisher() {
        let publisher = AuditPublisher::disabled("svc");
        publisher.record(AuditAction::CreateSuccess, EntityKind::Team, "ignored");
        publisher.flush().await;
        assert_eq!(publisher.service(), "svc");
    }
}
