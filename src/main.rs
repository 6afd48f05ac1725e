use std::sync::Arc;

use anyhow::Result;
use pv_forecast_service::{config, service, stream, telemetry};
use config::Config;
use service::{ForecastService, ServiceOptions};
use stream::RedisStreams;
use telemetry::init_tracing;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    let streams = Arc::new(RedisStreams::connect(&cfg.redis, &cfg.pv_sim).await?);

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        telemetry::shutdown_signal().await;
        trigger.cancel();
    });

    info!(
        input_stream = %cfg.pv_sim.input_stream,
        output_stream = %cfg.pv_sim.output_stream,
        p_stc = cfg.pv_sim.parameters.p_stc,
        "starting PV forecast service"
    );

    let mut service = ForecastService::new(
        streams.clone(),
        streams,
        cfg.pv_sim.parameters.clone(),
    )
    .with_options(ServiceOptions {
        idle_log_interval: cfg.service.idle_log_interval(),
    });

    let stats = service.run(shutdown).await?;

    warn!(
        published = stats.published,
        dropped = stats.dropped,
        "shutdown complete"
    );
    Ok(())
}
