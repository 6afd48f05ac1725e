//! Redis Streams transport (`XREAD` / `XADD`).

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::streams::{StreamReadOptions, StreamReadReply};
use redis::{AsyncCommands, Client};
use tracing::info;

use super::{StreamConsumer, StreamProducer, TransportError};
use crate::config::{PvSimConfig, RedisConfig};
use crate::domain::StreamMessage;

/// Reads the input stream and appends to the output stream of one Redis database.
///
/// A connection is opened per read and per publish and dropped when the call returns,
/// so a failed cycle never leaves a half-used connection behind.
pub struct RedisStreams {
    client: Client,
    input_stream: String,
    output_stream: String,
}

impl RedisStreams {
    /// Build the client and check the server answers `PING` before the service starts
    pub async fn connect(redis: &RedisConfig, pv_sim: &PvSimConfig) -> Result<Self, TransportError> {
        info!(
            host = %redis.host,
            port = redis.port,
            db = redis.db,
            "configuring redis connection"
        );
        let client = Client::open(redis.url())
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let streams = Self {
            client,
            input_stream: pv_sim.input_stream.clone(),
            output_stream: pv_sim.output_stream.clone(),
        };

        let mut conn = streams.connection().await?;
        let _pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        info!(host = %redis.host, port = redis.port, db = redis.db, "redis connection is alive");

        Ok(streams)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, TransportError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))
    }

    fn read_error(&self, reason: impl ToString) -> TransportError {
        TransportError::Read {
            stream: self.input_stream.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl StreamConsumer for RedisStreams {
    async fn read_next(&self) -> Result<StreamMessage, TransportError> {
        let mut conn = self.connection().await?;

        // `$` = only entries added after this call, BLOCK 0 = wait forever
        let options = StreamReadOptions::default().count(1).block(0);
        let reply: StreamReadReply = conn
            .xread_options(&[self.input_stream.as_str()], &["$"], &options)
            .await
            .map_err(|e| self.read_error(e))?;

        let entry = reply
            .keys
            .into_iter()
            .next()
            .and_then(|key| key.ids.into_iter().last())
            .ok_or_else(|| TransportError::UnexpectedReply {
                stream: self.input_stream.clone(),
                reason: "XREAD returned no entry".to_string(),
            })?;

        entry
            .map
            .into_iter()
            .map(|(field, value)| {
                let value: String = redis::from_redis_value(&value).map_err(|e| {
                    TransportError::UnexpectedReply {
                        stream: self.input_stream.clone(),
                        reason: format!("field `{field}` of entry {}: {e}", entry.id),
                    }
                })?;
                Ok((field, value))
            })
            .collect()
    }

    fn stream_name(&self) -> &str {
        &self.input_stream
    }
}

#[async_trait]
impl StreamProducer for RedisStreams {
    async fn publish(&self, message: StreamMessage) -> Result<(), TransportError> {
        let mut conn = self.connection().await?;
        let items: Vec<(String, String)> = message.into_iter().collect();
        let _id: String = conn
            .xadd(&self.output_stream, "*", items.as_slice())
            .await
            .map_err(|e| TransportError::Publish {
                stream: self.output_stream.clone(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn stream_name(&self) -> &str {
        &self.output_stream
    }
}
