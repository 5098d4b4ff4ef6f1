use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber for a host process embedding this
/// crate. Honors `RUST_LOG` with a safe `info` default.
pub fn init_telemetry() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Default `SystemTime` formatter prints UTC; membership windows are
    // local calendar days, so log in local time as well.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
