// Logging module - Logging infrastructure
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use std::io;

/// Initialize the logging system.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to
/// this crate with warnings and errors from dependencies.
pub fn init_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatkit_relay={},warn", log_level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true)
        )
        .try_init()?;

    tracing::info!("ChatKit relay logging system initialized");
    Ok(())
}
