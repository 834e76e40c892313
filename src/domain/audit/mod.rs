//! Audit domain
//!
//! Audit records describe what happened to an entity. Recording is
//! best-effort and never affects the outcome of the operation itself.

mod entry;
mod sink;

pub use entry::{AuditAction, AuditEntry, EntityKind};
pub use sink::AuditSink;

#[cfg(test)]
pub use sink::MockAuditSink;
