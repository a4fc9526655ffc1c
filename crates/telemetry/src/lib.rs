//! Logging and tracing bootstrap.

use anyhow::Context;
use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber described by `settings`.
///
/// `RUST_LOG`, when set, takes precedence over `telemetry.log_filter`.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &settings.log_filter)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    }
    .context("failed to install tracing subscriber")?;

    tracing::debug!(
        target: "shelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

/// Best-effort plain subscriber for failures that happen before settings exist.
pub fn init_fallback() {
    tracing_subscriber::fmt::try_init().ok();
}

fn build_filter(rust_log: Option<&str>, configured: &str) -> anyhow::Result<EnvFilter> {
    let directives = rust_log.unwrap_or(configured);
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter '{}'", directives))
}
