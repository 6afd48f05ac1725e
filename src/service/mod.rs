//! Streaming loop: read one weather forecast, simulate, publish one PV forecast.
//!
//! Data problems (undecodable message, unusable observation, unencodable result) drop the
//! message and the loop keeps going. Transport problems end the loop and are returned to
//! the caller; nothing here retries.

use std::sync::Arc;
use std::time::Duration;

use strum::Display;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::codec::{decode, encode, fields, DecodeError, EncodeError};
use crate::domain::{ForecastEvent, StreamMessage};
use crate::simulation::{simulate, SimulationError, SimulationParameters};
use crate::stream::{StreamConsumer, StreamProducer, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ServiceState {
    Wait,
    Decode,
    Simulate,
    Publish,
    Stopped,
}

/// Reasons a single message is dropped
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug)]
pub enum CycleOutcome {
    Published,
    Dropped(CycleError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub published: u64,
    pub dropped: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceOptions {
    /// Log a liveness line at this interval while waiting for input
    pub idle_log_interval: Option<Duration>,
}

pub struct ForecastService {
    consumer: Arc<dyn StreamConsumer>,
    producer: Arc<dyn StreamProducer>,
    params: SimulationParameters,
    options: ServiceOptions,
    state: ServiceState,
    stats: ServiceStats,
}

impl ForecastService {
    pub fn new(
        consumer: Arc<dyn StreamConsumer>,
        producer: Arc<dyn StreamProducer>,
        params: SimulationParameters,
    ) -> Self {
        Self {
            consumer,
            producer,
            params,
            options: ServiceOptions::default(),
            state: ServiceState::Wait,
            stats: ServiceStats::default(),
        }
    }

    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats
    }

    /// Process messages until `shutdown` is cancelled or the transport fails.
    ///
    /// Cancellation is only observed while waiting for input; a cycle that has
    /// already read its message always runs to completion.
    pub async fn run(&mut self, shutdown: CancellationToken) -> Result<ServiceStats, TransportError> {
        info!(
            input_stream = self.consumer.stream_name(),
            output_stream = self.producer.stream_name(),
            "forecast service started"
        );

        loop {
            self.state = ServiceState::Wait;
            let consumer = Arc::clone(&self.consumer);
            let idle = self.options.idle_log_interval;

            let read = tokio::select! {
                biased;
                _ = shutdown.cancelled() => None,
                read = wait_for_message(consumer.as_ref(), idle) => Some(read),
            };

            let raw = match read {
                None => {
                    self.state = ServiceState::Stopped;
                    info!(
                        published = self.stats.published,
                        dropped = self.stats.dropped,
                        "forecast service stopped"
                    );
                    return Ok(self.stats);
                }
                Some(Ok(raw)) => raw,
                Some(Err(e)) => {
                    self.state = ServiceState::Stopped;
                    return Err(e);
                }
            };

            if let Err(e) = self.run_cycle(raw).await {
                self.state = ServiceState::Stopped;
                return Err(e);
            }
        }
    }

    /// Handle one input message. Only a failed publish is an error; data problems
    /// come back as [`CycleOutcome::Dropped`].
    pub async fn run_cycle(&mut self, raw: StreamMessage) -> Result<CycleOutcome, TransportError> {
        let station = raw.get(fields::STATION).cloned().unwrap_or_default();
        let forecast_time = raw.get(fields::FORECAST_TIME).cloned().unwrap_or_default();

        let event = match self.process(&raw) {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    station = %station,
                    forecast_time = %forecast_time,
                    state = %self.state,
                    error = %e,
                    "dropping weather forecast"
                );
                self.stats.dropped += 1;
                return Ok(CycleOutcome::Dropped(e));
            }
        };

        self.producer.publish(event.into_message()).await?;
        self.stats.published += 1;
        info!(
            station = %station,
            forecast_time = %forecast_time,
            stream = self.producer.stream_name(),
            "published pv forecast"
        );
        Ok(CycleOutcome::Published)
    }

    fn process(&mut self, raw: &StreamMessage) -> Result<ForecastEvent, CycleError> {
        self.state = ServiceState::Decode;
        let observation = decode(raw)?;

        self.state = ServiceState::Simulate;
        let result = simulate(&observation, &self.params)?;

        self.state = ServiceState::Publish;
        let event = encode(&result, &observation.context())?;
        debug!(
            station = %observation.station_id,
            entries = result.len(),
            "encoded pv forecast"
        );
        Ok(event)
    }
}

async fn wait_for_message(
    consumer: &dyn StreamConsumer,
    idle: Option<Duration>,
) -> Result<StreamMessage, TransportError> {
    let Some(every) = idle else {
        return consumer.read_next().await;
    };

    let read = consumer.read_next();
    tokio::pin!(read);
    let started = Instant::now();
    let mut ticker = tokio::time::interval_at(started + every, every);
    loop {
        tokio::select! {
            result = &mut read => return result,
            _ = ticker.tick() => {
                info!(
                    stream = consumer.stream_name(),
                    waiting_secs = started.elapsed().as_secs(),
                    "waiting for weather forecast"
                );
            }
        }
    }
}
