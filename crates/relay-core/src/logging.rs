use crate::{errors::Error, Result};

/// Initialize logging/tracing for the relay.
///
/// Default: info for our crates, warn for everything else.
/// Can be overridden with `RUST_LOG`.
pub fn init(service_name: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,relay=info,relay_core=info,relay_telegram=info,{service_name}=info"
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(true)
        .try_init()
        .map_err(|e| Error::External(format!("failed to install log subscriber: {e}")))?;

    Ok(())
}
