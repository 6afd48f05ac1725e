//! Event stream transports.
//!
//! The service only needs two operations: block until the next input message arrives,
//! and append one output message. Both are behind traits so the loop can run against
//! Redis Streams in production and an in-process channel in tests.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_streams;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::StreamMessage;

pub use memory::{memory_stream, MemoryConsumer, MemoryProducer, MemorySender};
#[cfg(feature = "redis")]
pub use redis_streams::RedisStreams;

/// Connectivity failures. These are never retried by the service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("read from stream `{stream}` failed: {reason}")]
    Read { stream: String, reason: String },
    #[error("publish to stream `{stream}` failed: {reason}")]
    Publish { stream: String, reason: String },
    #[error("unexpected reply from stream `{stream}`: {reason}")]
    UnexpectedReply { stream: String, reason: String },
    #[error("stream closed")]
    Closed,
}

/// Source of input messages
#[async_trait]
pub trait StreamConsumer: Send + Sync {
    /// Wait for the next message and return exactly one.
    ///
    /// Log-backed implementations only return entries appended after the call started,
    /// so a backlog built up while the service was down is skipped.
    async fn read_next(&self) -> Result<StreamMessage, TransportError>;

    /// Name used in log lines
    fn stream_name(&self) -> &str;
}

/// Sink for output messages
#[async_trait]
pub trait StreamProducer: Send + Sync {
    async fn publish(&self, message: StreamMessage) -> Result<(), TransportError>;

    fn stream_name(&self) -> &str;
}
