// Logging initialization
//
// Console logging through tracing-subscriber with an EnvFilter.
// Configure via environment variables:
// - RUST_LOG or LOG_LEVEL: log filter (default: DEFAULT_LOG_FILTER)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_FILTER: &str = "webcal_control_plane=debug,tower_http=debug";

/// Configuration for logging
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Log filter (e.g., "info", "webcal_control_plane=debug")
    pub log_filter: Option<String>,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var("RUST_LOG")
                .ok()
                .or_else(|| std::env::var("LOG_LEVEL").ok()),
        }
    }

    /// The filter to install; an unparsable filter falls back to the default.
    pub fn filter(&self) -> EnvFilter {
        self.log_filter
            .as_deref()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init_telemetry(config: &TelemetryConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(config.filter()),
        )
        .init();
}
