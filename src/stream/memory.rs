//! In-process stream pair, used by tests and local runs without Redis.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::{StreamConsumer, StreamProducer, TransportError};
use crate::domain::StreamMessage;

/// Feeding side of an in-memory input stream
#[derive(Debug, Clone)]
pub struct MemorySender {
    tx: mpsc::UnboundedSender<StreamMessage>,
}

impl MemorySender {
    pub fn send(&self, message: StreamMessage) -> Result<(), TransportError> {
        self.tx.send(message).map_err(|_| TransportError::Closed)
    }
}

/// Consumer over an in-memory channel; messages are delivered in send order.
/// Reads fail with [`TransportError::Closed`] once every sender is dropped.
#[derive(Debug)]
pub struct MemoryConsumer {
    name: String,
    rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<StreamMessage>>,
}

pub fn memory_stream(name: impl Into<String>) -> (MemorySender, MemoryConsumer) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        MemorySender { tx },
        MemoryConsumer {
            name: name.into(),
            rx: tokio::sync::Mutex::new(rx),
        },
    )
}

#[async_trait]
impl StreamConsumer for MemoryConsumer {
    async fn read_next(&self) -> Result<StreamMessage, TransportError> {
        self.rx.lock().await.recv().await.ok_or(TransportError::Closed)
    }

    fn stream_name(&self) -> &str {
        &self.name
    }
}

/// Producer that records every published message
#[derive(Debug, Clone, Default)]
pub struct MemoryProducer {
    name: String,
    published: Arc<Mutex<Vec<StreamMessage>>>,
}

impl MemoryProducer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            published: Arc::default(),
        }
    }

    pub fn published(&self) -> Vec<StreamMessage> {
        self.published.lock().clone()
    }
}

#[async_trait]
impl StreamProducer for MemoryProducer {
    async fn publish(&self, message: StreamMessage) -> Result<(), TransportError> {
        self.published.lock().push(message);
        Ok(())
    }

    fn stream_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(station: &str) -> StreamMessage {
        StreamMessage::from([("station".to_string(), station.to_string())])
    }

    #[tokio::test]
    async fn test_messages_arrive_in_order() {
        let (tx, consumer) = memory_stream("weather");
        tx.send(message("a")).unwrap();
        tx.send(message("b")).unwrap();

        assert_eq!(consumer.read_next().await.unwrap()["station"], "a");
        assert_eq!(consumer.read_next().await.unwrap()["station"], "b");
        assert_eq!(consumer.stream_name(), "weather");
    }

    #[tokio::test]
    async fn test_read_after_senders_dropped_is_closed() {
        let (tx, consumer) = memory_stream("weather");
        drop(tx);
        assert!(matches!(
            consumer.read_next().await,
            Err(TransportError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_producer_records_messages() {
        let producer = MemoryProducer::new("pv");
        let handle = producer.clone();
        producer.publish(message("x")).await.unwrap();
        assert_eq!(handle.published().len(), 1);
    }
}
