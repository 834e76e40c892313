//! Audit infrastructure: sinks and the channel-backed publisher

mod in_memory;
mod publisher;
mod tracing_sink;

pub use in_memory::InMemoryAuditSink;
pub use publisher::AuditPublisher;
pub use tracing_sink::TracingAuditSink;
