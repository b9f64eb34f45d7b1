use std::env;

use tracing::warn;

use crate::logging::LogFormat;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CARBON_API_URL: &str = "https://api.carbonintensity.org.uk";
pub const DEFAULT_COVID_API_URL: &str = "https://api.coronavirus.data.gov.uk/generic";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub carbon_api_url: String,
    pub covid_api_url: String,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            carbon_api_url: DEFAULT_CARBON_API_URL.to_string(),
            covid_api_url: DEFAULT_COVID_API_URL.to_string(),
            log_format: LogFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Reads `PORT`, `CARBON_API_URL`, `COVID_API_URL`, `LOG_FORMAT` and `RUST_LOG`,
    /// falling back to the public APIs, port 3000 and json logs at `info`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            carbon_api_url: lookup("CARBON_API_URL").unwrap_or(defaults.carbon_api_url),
            covid_api_url: lookup("COVID_API_URL").unwrap_or(defaults.covid_api_url),
            log_format: lookup("LOG_FORMAT")
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.log_format),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Settings that silently fell back to a default. Logged once logging is up.
    pub fn warn_ignored(&self) {
        if let Ok(port) = env::var("PORT") {
            if port.parse::<u16>().is_err() {
                warn!(%port, default = DEFAULT_PORT, "ignoring unparseable PORT");
            }
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            if let Err(e) = format.parse::<LogFormat>() {
                warn!(error = %e, "ignoring LOG_FORMAT");
            }
        }
    }
}
