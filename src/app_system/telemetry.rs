use tracing_subscriber::EnvFilter;

use super::TelemetryConfig;

/// Installs the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn setup_tracing(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime());

    if config.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
