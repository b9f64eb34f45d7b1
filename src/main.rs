use std::net::SocketAddr;

use tracing::info;

use regional_aggregator::config::Config;
use regional_aggregator::logging::init_logging;
use regional_aggregator::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_logging(config.log_format, &config.log_filter);
    config.warn_ignored();

    info!(
        carbon_api = %config.carbon_api_url,
        covid_api = %config.covid_api_url,
        "upstreams configured"
    );

    let app = app(AppState::from_config(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "app listening");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
