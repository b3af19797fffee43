use anyhow::Result;
use hazardwatch::{
    AlertEngine, AlertSession, HazardwatchConfig, HttpReportProvider, LogAnnouncer, Permissions,
    Position,
};
use std::env;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulated location-stream cadence; stands in for the platform's
/// watchPosition timing knobs.
const UPDATE_INTERVAL: Duration = Duration::from_secs(5);
const UPDATE_COUNT: usize = 6;

#[tokio::main]
async fn main() -> Result<()> {
    let config = HazardwatchConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .init();

    info!(version = hazardwatch::VERSION, "starting hazardwatch demo");

    // Start point defaults to central Querétaro; override with `lat lng` args
    let mut args = env::args().skip(1);
    let latitude = args.next().and_then(|a| a.parse().ok()).unwrap_or(20.5888);
    let longitude = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(-100.3899);

    let provider = HttpReportProvider::new(&config.reports)?;
    let engine = AlertEngine::new(provider, LogAnnouncer, config.engine.clone());
    let session = AlertSession::start(engine, Permissions::granted())?;

    // Walk roughly north, one block per update
    for step in 0..UPDATE_COUNT {
        let position = Position::new(latitude + step as f64 * 0.001, longitude);
        info!(position = %position.format_coordinates(), "position update");
        session.submit_position(position);
        tokio::time::sleep(UPDATE_INTERVAL).await;
    }

    session.stop().await;
    info!("tracking session ended");
    Ok(())
}
