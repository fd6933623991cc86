use std::sync::Arc;

use anyhow::Context;

use relay_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    relay_core::logging::init("relay")?;

    // Missing credential is the one fatal path; nothing is polled without it.
    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!("FATAL ERROR: {e}");
            std::process::exit(1);
        }
    };

    relay_telegram::router::run_polling(cfg)
        .await
        .context("telegram bot failed")?;

    Ok(())
}
