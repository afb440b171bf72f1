use std::sync::Arc;

use cbb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), cbb_core::Error> {
    cbb_core::logging::init("cbb")?;

    // Missing or invalid settings are fatal before the dispatch loop starts.
    let cfg = Arc::new(Config::load()?);

    cbb_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| cbb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
