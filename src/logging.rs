use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output shape of log lines, picked with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else if s.eq_ignore_ascii_case("text") || s.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Text)
        } else {
            Err(format!("unknown log format {s:?}"))
        }
    }
}

/// Installs the global subscriber; `filter` takes `RUST_LOG` style directives.
/// Unparseable directives fall back to `info`.
pub fn init_logging(format: LogFormat, filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer().compact()).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(true))
            .init(),
    }
}
