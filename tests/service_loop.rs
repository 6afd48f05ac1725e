//! Streaming loop behaviour against mocked and in-memory transports.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::{mock, Sequence};
use tokio_util::sync::CancellationToken;

use common::weather_message;
use pv_forecast_service::domain::StreamMessage;
use pv_forecast_service::service::{ForecastService, ServiceState, ServiceStats};
use pv_forecast_service::simulation::SimulationParameters;
use pv_forecast_service::stream::{
    memory_stream, MemoryProducer, StreamConsumer, StreamProducer, TransportError,
};

mock! {
    pub Consumer {}

    #[async_trait]
    impl StreamConsumer for Consumer {
        async fn read_next(&self) -> Result<StreamMessage, TransportError>;
        fn stream_name(&self) -> &str;
    }
}

mock! {
    pub Producer {}

    #[async_trait]
    impl StreamProducer for Producer {
        async fn publish(&self, message: StreamMessage) -> Result<(), TransportError>;
        fn stream_name(&self) -> &str;
    }
}

fn consumer() -> MockConsumer {
    let mut consumer = MockConsumer::new();
    consumer
        .expect_stream_name()
        .return_const("weather_forecast".to_string());
    consumer
}

fn producer() -> MockProducer {
    let mut producer = MockProducer::new();
    producer
        .expect_stream_name()
        .return_const("pv_forecast".to_string());
    producer
}

fn service(consumer: MockConsumer, producer: MockProducer) -> ForecastService {
    ForecastService::new(
        Arc::new(consumer),
        Arc::new(producer),
        SimulationParameters::default(),
    )
}

#[tokio::test]
async fn malformed_message_is_dropped_and_loop_continues() {
    let mut seq = Sequence::new();
    let mut consumer = consumer();
    consumer
        .expect_read_next()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| {
            let mut raw = weather_message();
            raw.insert("observation_time".into(), "['not a time']".into());
            Ok(raw)
        });
    consumer
        .expect_read_next()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(weather_message()));
    consumer
        .expect_read_next()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(TransportError::Closed));

    let mut producer = producer();
    producer
        .expect_publish()
        .times(1)
        .withf(|message| {
            message["location"] == "10382" && message["data_provider"] == "\"PVSystemSim\""
        })
        .returning(|_| Ok(()));

    let mut service = service(consumer, producer);
    let result = service.run(CancellationToken::new()).await;

    assert!(matches!(result, Err(TransportError::Closed)));
    assert_eq!(
        service.stats(),
        ServiceStats {
            published: 1,
            dropped: 1
        }
    );
}

#[tokio::test]
async fn read_failure_terminates_without_retry() {
    let mut consumer = consumer();
    consumer.expect_read_next().times(1).returning(|| {
        Err(TransportError::Read {
            stream: "weather_forecast".into(),
            reason: "connection reset".into(),
        })
    });
    let mut producer = producer();
    producer.expect_publish().never();

    let mut service = service(consumer, producer);
    let result = service.run(CancellationToken::new()).await;

    assert!(matches!(result, Err(TransportError::Read { .. })));
    assert_eq!(service.state(), ServiceState::Stopped);
    assert_eq!(service.stats(), ServiceStats::default());
}

#[tokio::test]
async fn publish_failure_terminates() {
    let mut consumer = consumer();
    consumer
        .expect_read_next()
        .times(1)
        .returning(|| Ok(weather_message()));
    let mut producer = producer();
    producer.expect_publish().times(1).returning(|_| {
        Err(TransportError::Publish {
            stream: "pv_forecast".into(),
            reason: "READONLY".into(),
        })
    });

    let mut service = service(consumer, producer);
    let result = service.run(CancellationToken::new()).await;

    assert!(matches!(result, Err(TransportError::Publish { .. })));
    assert_eq!(service.stats().published, 0);
}

#[tokio::test]
async fn cancellation_while_waiting_stops_cleanly() {
    let (_tx, consumer) = memory_stream("weather_forecast");
    let producer = MemoryProducer::new("pv_forecast");
    let mut service = ForecastService::new(
        Arc::new(consumer),
        Arc::new(producer.clone()),
        SimulationParameters::default(),
    );

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let stats = service.run(token).await.unwrap();

    assert_eq!(stats, ServiceStats::default());
    assert_eq!(service.state(), ServiceState::Stopped);
    assert!(producer.published().is_empty());
}

#[tokio::test]
async fn memory_streams_end_to_end() {
    let (tx, consumer) = memory_stream("weather_forecast");
    let producer = MemoryProducer::new("pv_forecast");
    let mut service = ForecastService::new(
        Arc::new(consumer),
        Arc::new(producer.clone()),
        SimulationParameters::default(),
    );

    tx.send(weather_message()).unwrap();
    let mut broken = weather_message();
    broken.remove("latitude");
    tx.send(broken).unwrap();
    tx.send(weather_message()).unwrap();

    let token = CancellationToken::new();
    let runner = tokio::spawn({
        let token = token.clone();
        async move {
            let stats = service.run(token).await;
            (service, stats)
        }
    });

    for _ in 0..200 {
        if producer.published().len() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    token.cancel();
    let (service, stats) = runner.await.unwrap();

    assert_eq!(
        stats.unwrap(),
        ServiceStats {
            published: 2,
            dropped: 1
        }
    );
    assert_eq!(service.state(), ServiceState::Stopped);

    let published = producer.published();
    assert_eq!(published.len(), 2);
    for message in &published {
        let power: Vec<f64> = serde_json::from_str(&message["p_forecast"]).unwrap();
        assert_eq!(power.len(), 3);
        assert_eq!(message["forecast_time"], "2024-06-21T03:00:00Z");
    }
    drop(tx);
}
