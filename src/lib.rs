//! Regional carbon-intensity and COVID-19 aggregation service.
//!
//! - `GET /` greeting
//! - `GET /regional/:region/:date` one day of carbon and covid data
//! - `GET /regional/:region/:start/:end` the same over a date range
//! - `GET /data_availability` which regions have which data

use std::sync::Arc;

use axum::routing::any;
use axum::Router;

pub mod aggregate;
pub mod carbon;
pub mod config;
pub mod constants;
pub mod covid;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod upstream;

use carbon::{CarbonClient, CarbonSource};
use config::Config;
use covid::{CovidClient, CovidSource};

#[derive(Clone)]
pub struct AppState {
    pub carbon: Arc<dyn CarbonSource>,
    pub covid: Arc<dyn CovidSource>,
}

impl AppState {
    pub fn new(carbon: Arc<dyn CarbonSource>, covid: Arc<dyn CovidSource>) -> Self {
        Self { carbon, covid }
    }

    /// State backed by the real upstream APIs, sharing one HTTPS client.
    pub fn from_config(config: &Config) -> Self {
        let client = upstream::https_client();
        Self::new(
            Arc::new(CarbonClient::new(config.carbon_api_url.clone(), client.clone())),
            Arc::new(CovidClient::new(config.covid_api_url.clone(), client)),
        )
    }
}

/// Every route accepts any method so that non-GET requests get our 400 rather than a 405.
/// The router wants one parameter name per segment, so range starts are captured as `:date`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::index))
        .route("/regional/:region/:date", any(handlers::regional_day))
        .route("/regional/:region/:date/", any(handlers::regional_range))
        .route("/regional/:region/:date/:end", any(handlers::regional_range))
        .route("/data_availability", any(handlers::data_availability))
        .with_state(state)
}
