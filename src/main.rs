use anyhow::Result;

use flightlog::app::App;
use flightlog::config::{self, Config};
use flightlog::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure config directory exists (creates logs dir too)
    config::ensure_directories()?;

    // Initialize file logging BEFORE any tracing calls
    let (log_file_info, _guard) = logging::init_file_logging(config::logs_dir())?;

    let config = Config::load()?;

    match logging::cleanup_old_logs(
        &config::logs_dir(),
        config.log_retention_days,
        Some(&log_file_info.path),
    ) {
        Ok(count) if count > 0 => tracing::info!("Cleaned up {} old log files", count),
        Ok(_) => {}
        Err(e) => tracing::warn!("Log cleanup failed: {}", e),
    }

    tracing::info!("Logging to: {}", log_file_info.path.display());

    let mut app = App::new(config, log_file_info).await?;
    app.run().await
}
